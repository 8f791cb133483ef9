// src/core/matcher.rs
use crate::core::root_index::HindiRootIndex;
use crate::fuzzy::{is_fuzzy_match, Similarity};

/// How a candidate was found in the Hindi sentence, in the order the stages
/// are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStage {
    /// A multi-word candidate occurring verbatim in the sentence.
    Phrase,
    ExactToken,
    ExactRoot,
    FuzzyToken,
    FuzzyRoot,
}

impl MatchStage {
    pub const ORDER: [MatchStage; 5] = [
        MatchStage::Phrase,
        MatchStage::ExactToken,
        MatchStage::ExactRoot,
        MatchStage::FuzzyToken,
        MatchStage::FuzzyRoot,
    ];
}

/// A candidate located in the Hindi sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// The sentence text that matched (a token, a phrase or the surface word
    /// behind a root).
    pub text: String,
    /// Index of the last sentence token the match covers, if it can be placed.
    pub end: Option<usize>,
    pub stage: MatchStage,
}

/// Looks for any of a list of Hindi candidates inside one sentence.
pub struct SentenceMatcher<'a> {
    tokens: &'a [&'a str],
    joined: String,
    root_index: &'a HindiRootIndex,
    similarity: &'a dyn Similarity,
    threshold: u8,
}

impl<'a> SentenceMatcher<'a> {
    pub fn new(
        tokens: &'a [&'a str],
        root_index: &'a HindiRootIndex,
        similarity: &'a dyn Similarity,
        threshold: u8,
    ) -> Self {
        Self {
            tokens,
            joined: tokens.join(" "),
            root_index,
            similarity,
            threshold,
        }
    }

    /// Tries every stage in order and returns the first hit.
    pub fn find(&self, candidates: &[String]) -> Option<Hit> {
        if candidates.is_empty() {
            return None;
        }
        MatchStage::ORDER
            .iter()
            .find_map(|&stage| self.find_at(stage, candidates))
    }

    pub fn find_at(&self, stage: MatchStage, candidates: &[String]) -> Option<Hit> {
        let hit = |text: &str, end: Option<usize>| Hit {
            text: text.to_string(),
            end,
            stage,
        };
        match stage {
            MatchStage::Phrase => candidates
                .iter()
                .filter(|c| c.contains(|ch| matches!(ch, '-' | '_' | ' ')))
                .find_map(|c| {
                    let phrase = c
                        .split(|ch: char| ch == '-' || ch == '_' || ch.is_whitespace())
                        .filter(|w| !w.is_empty())
                        .collect::<Vec<_>>()
                        .join(" ");
                    (!phrase.is_empty() && self.joined.contains(&phrase))
                        .then(|| hit(&phrase, self.locate(&phrase)))
                }),
            MatchStage::ExactToken => self
                .tokens
                .iter()
                .position(|t| candidates.iter().any(|c| c == t))
                .map(|i| hit(self.tokens[i], Some(i))),
            MatchStage::ExactRoot => self
                .root_index
                .iter()
                .find(|(root, _)| candidates.iter().any(|c| c == root))
                .map(|(_, word)| hit(word, self.locate(word))),
            MatchStage::FuzzyToken => self
                .tokens
                .iter()
                .position(|t| candidates.iter().any(|c| self.is_close(t, c)))
                .map(|i| hit(self.tokens[i], Some(i))),
            MatchStage::FuzzyRoot => self
                .root_index
                .iter()
                .find(|(root, _)| candidates.iter().any(|c| self.is_close(root, c)))
                .map(|(_, word)| hit(word, self.locate(word))),
        }
    }

    fn is_close(&self, a: &str, b: &str) -> bool {
        is_fuzzy_match(self.similarity, a, b, self.threshold)
    }

    /// Index of the last token of the first occurrence of `text` (one or
    /// more space-separated words) in the sentence.
    pub fn locate(&self, text: &str) -> Option<usize> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() || words.len() > self.tokens.len() {
            return None;
        }
        self.tokens
            .windows(words.len())
            .position(|w| w == words.as_slice())
            .map(|start| start + words.len() - 1)
    }

    pub fn tokens(&self) -> &[&str] {
        self.tokens
    }
}
