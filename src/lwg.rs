// File: src/lwg.rs
//
// Local word grouping: the verb phrase (auxiliaries, adverbs, main verb)
// that realizes one verb sense in the English sentence.
use std::collections::HashSet;
use tracing::debug;

/// Supplies the verb-phrase chunks of an English sentence, in sentence order.
/// A verb phrase is zero or more adverbs followed by one or more verbs.
pub trait VerbChunker {
    fn verb_chunks(&self, sentence: &str) -> Vec<Vec<String>>;
}

/// Returns the chunk containing `lemma` as a substring of one of its tokens.
/// When several chunks match, the last one wins. Empty when none does.
pub fn resolve_lwg(lemma: &str, sentence: &str, chunker: &dyn VerbChunker) -> Vec<String> {
    if lemma.is_empty() {
        return Vec::new();
    }
    let mut grouping = Vec::new();
    for chunk in chunker.verb_chunks(sentence) {
        if chunk.iter().any(|token| token.contains(lemma)) {
            grouping = chunk;
        }
    }
    debug!(lemma, ?grouping, "resolved local word grouping");
    grouping
}

const AUXILIARIES: [&str; 31] = [
    "am", "is", "are", "was", "were", "be", "been", "being", "'m", "'re", "'s",
    "has", "have", "had", "having", "'ve", "'d", "do", "does", "did",
    "will", "would", "shall", "should", "can", "could", "may", "might", "must", "'ll", "ought",
];

const ADVERBS: [&str; 22] = [
    "not", "n't", "never", "also", "always", "just", "already", "still", "often", "soon",
    "ever", "then", "now", "sometimes", "usually", "again", "almost", "really", "rarely",
    "seldom", "once", "too",
];

/// Words ending in `-ly` that are not adverbs.
const LY_NOUNS: [&str; 10] = [
    "family", "reply", "supply", "apply", "july", "italy", "belly", "jelly", "holy", "ugly",
];

const IRREGULAR_FORMS: [&str; 40] = [
    "went", "gone", "ate", "eaten", "ran", "saw", "seen", "made", "took", "taken", "came",
    "gave", "given", "said", "got", "gotten", "knew", "known", "thought", "told", "found",
    "left", "felt", "brought", "bought", "began", "begun", "wrote", "written", "spoke",
    "spoken", "drank", "drunk", "sang", "swam", "slept", "sat", "stood", "won", "lost",
];

const DETERMINERS: [&str; 8] = ["the", "a", "an", "this", "that", "these", "those", "his"];

const INFLECTIONS: [&str; 7] = ["", "s", "es", "ed", "d", "ing", "en"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Adverb,
    Verb,
    Other,
}

/// Closed-class word lists and suffix rules standing in for a statistical
/// tagger. Verb lemmas known to be in the corpus can be registered so their
/// inflected forms tag as verbs.
#[derive(Debug, Clone, Default)]
pub struct RuleChunker {
    verb_lemmas: HashSet<String>,
}

impl RuleChunker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verb_lemmas<I, S>(mut self, lemmas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.verb_lemmas.extend(
            lemmas
                .into_iter()
                .map(|l| l.as_ref().to_lowercase())
                .filter(|l| !l.is_empty()),
        );
        self
    }

    fn inflects_known_lemma(&self, word: &str) -> bool {
        self.verb_lemmas.iter().any(|lemma| {
            let stems = [lemma.as_str(), lemma.strip_suffix('e').unwrap_or(lemma)];
            stems.iter().any(|stem| {
                word.strip_prefix(stem).is_some_and(|rest| {
                    let rest = match stem.chars().last() {
                        Some(last) if rest.len() > 2 => rest.strip_prefix(last).unwrap_or(rest),
                        _ => rest,
                    };
                    INFLECTIONS.contains(&rest)
                })
            })
        })
    }

    fn tag(&self, token: &str, prev: Option<&str>) -> Tag {
        let word = token.to_lowercase();
        let w = word.as_str();
        if AUXILIARIES.contains(&w) || IRREGULAR_FORMS.contains(&w) {
            return Tag::Verb;
        }
        if ADVERBS.contains(&w) || (w.len() > 4 && w.ends_with("ly") && !LY_NOUNS.contains(&w)) {
            return Tag::Adverb;
        }
        if self.inflects_known_lemma(w) {
            return Tag::Verb;
        }
        let after_determiner = prev.is_some_and(|p| DETERMINERS.contains(&p.to_lowercase().as_str()));
        let suffixed = (w.len() > 4 && w.ends_with("ing")) || (w.len() > 3 && w.ends_with("ed"));
        if suffixed && !after_determiner && w.chars().all(char::is_alphabetic) {
            return Tag::Verb;
        }
        Tag::Other
    }
}

impl VerbChunker for RuleChunker {
    fn verb_chunks(&self, sentence: &str) -> Vec<Vec<String>> {
        let tokens = tokenize(sentence);
        let tags: Vec<Tag> = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| self.tag(t, i.checked_sub(1).map(|p| tokens[p].as_str())))
            .collect();

        // VP: <ADV>* <VB>+
        let mut chunks = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let start = i;
            let mut j = i;
            while j < tokens.len() && tags[j] == Tag::Adverb {
                j += 1;
            }
            let verbs_start = j;
            while j < tokens.len() && tags[j] == Tag::Verb {
                j += 1;
            }
            if j > verbs_start {
                chunks.push(tokens[start..j].to_vec());
                i = j;
            } else {
                i = start + 1;
            }
        }
        chunks
    }
}

const CLITICS: [&str; 7] = ["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"];

/// Whitespace tokenization with punctuation and English clitics split off
/// (`isn't` -> `is n't`, `John's` -> `John 's`).
pub fn tokenize(sentence: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for raw in sentence.split_whitespace() {
        let leading: String = raw.chars().take_while(|c| is_split_punct(*c)).collect();
        tokens.extend(leading.chars().map(String::from));

        let rest = &raw[leading.len()..];
        let core_end = rest.trim_end_matches(is_split_punct).len();
        let (core, trailing) = rest.split_at(core_end);

        let clitic_start = CLITICS.iter().find_map(|c| {
            let cut = core.len().checked_sub(c.len()).filter(|&cut| cut > 0)?;
            let tail = core.get(cut..)?;
            tail.eq_ignore_ascii_case(c).then_some(cut)
        });
        match clitic_start {
            Some(cut) => {
                tokens.push(core[..cut].to_string());
                tokens.push(core[cut..].to_string());
            }
            None if !core.is_empty() => tokens.push(core.to_string()),
            None => {}
        }
        tokens.extend(trailing.chars().map(String::from));
    }
    tokens
}

fn is_split_punct(c: char) -> bool {
    matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '"' | '(' | ')' | '[' | ']')
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedChunks(Vec<Vec<&'static str>>);

    impl VerbChunker for FixedChunks {
        fn verb_chunks(&self, _: &str) -> Vec<Vec<String>> {
            self.0
                .iter()
                .map(|c| c.iter().map(|t| t.to_string()).collect())
                .collect()
        }
    }

    #[test]
    fn tokenizer_splits_punctuation_and_clitics() {
        assert_eq!(
            tokenize("Tom isn't here, \"really\"."),
            ["Tom", "is", "n't", "here", ",", "\"", "really", "\"", "."]
        );
    }

    #[test]
    fn auxiliary_and_participle_form_one_chunk() {
        let chunks = RuleChunker::new().verb_chunks("He is running fast.");
        assert_eq!(chunks, vec![vec!["is".to_string(), "running".to_string()]]);
    }

    #[test]
    fn leading_adverbs_join_the_chunk() {
        let chunker = RuleChunker::new().with_verb_lemmas(["sleep"]);
        let chunks = chunker.verb_chunks("The cat never sleeps at night");
        assert_eq!(chunks, vec![vec!["never".to_string(), "sleeps".to_string()]]);
    }

    #[test]
    fn registered_lemmas_cover_doubled_consonants_and_silent_e() {
        let chunker = RuleChunker::new().with_verb_lemmas(["stop", "make"]);
        assert_eq!(chunker.tag("stopped", None), Tag::Verb);
        assert_eq!(chunker.tag("makes", None), Tag::Verb);
        assert_eq!(chunker.tag("making", None), Tag::Verb);
        assert_eq!(chunker.tag("maker", None), Tag::Other);
    }

    #[test]
    fn lwg_for_single_matching_chunk() {
        let chunker = RuleChunker::new();
        assert_eq!(
            resolve_lwg("run", "He is running fast", &chunker),
            ["is", "running"]
        );
    }

    #[test]
    fn last_matching_chunk_wins() {
        let chunker = FixedChunks(vec![vec!["was", "running"], vec!["ate"], vec!["kept", "running"]]);
        assert_eq!(resolve_lwg("run", "", &chunker), ["kept", "running"]);
    }

    #[test]
    fn no_chunk_no_grouping() {
        let chunker = FixedChunks(vec![vec!["ate"]]);
        assert!(resolve_lwg("run", "", &chunker).is_empty());
        assert!(resolve_lwg("", "", &chunker).is_empty());
    }

    #[test]
    fn substring_match_is_case_sensitive() {
        let chunker = FixedChunks(vec![vec!["Running"]]);
        assert!(resolve_lwg("run", "", &chunker).is_empty());
    }
}
