// src/core/resolver.rs
//
// Finds the Hindi word(s) for one English sense inside one sentence.
use tracing::debug;

use crate::config::AlignConfig;
use crate::core::converter::WxConverter;
use crate::core::matcher::{Hit, MatchStage, SentenceMatcher};
use crate::core::root_index::HindiRootIndex;
use crate::core::types::SenseKey;
use crate::error::Result;
use crate::fuzzy::Similarity;
use crate::lexicon::Lexicons;
use crate::translit::Transliterator;

/// Resolution strategies, tried in order until one succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Root anchor extended by the longest following TAM span. Verbs with a
    /// grouping only.
    VerbTam,
    Dictionary,
    Transliteration,
}

impl Strategy {
    const VERB: [Strategy; 3] = [
        Strategy::VerbTam,
        Strategy::Dictionary,
        Strategy::Transliteration,
    ];
    const CONTENT: [Strategy; 2] = [Strategy::Dictionary, Strategy::Transliteration];

    pub fn sequence(sense: &SenseKey, grouping: &[String]) -> &'static [Strategy] {
        if sense.is_verb() && !grouping.is_empty() {
            &Self::VERB
        } else {
            &Self::CONTENT
        }
    }
}

/// What is being looked up.
#[derive(Debug, Clone, Copy)]
pub struct Lookup<'a> {
    pub sense: &'a SenseKey,
    pub surface_form: &'a str,
    pub grouping: &'a [String],
}

/// The Hindi side of one sentence, with its root index.
pub struct SentenceContext<'a> {
    tokens: Vec<&'a str>,
    root_index: &'a HindiRootIndex,
}

impl<'a> SentenceContext<'a> {
    pub fn new(hindi: &'a str, root_index: &'a HindiRootIndex) -> Self {
        Self {
            tokens: hindi.split_whitespace().collect(),
            root_index,
        }
    }
}

/// A resolved equivalent, still in WX.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub wx: String,
    pub strategy: Strategy,
    pub stage: MatchStage,
    /// Last sentence token covered, used for postposition attachment.
    pub end: Option<usize>,
}

pub struct EquivalentResolver<'a> {
    lexicons: &'a Lexicons,
    config: &'a AlignConfig,
    similarity: &'a dyn Similarity,
    transliterator: &'a dyn Transliterator,
    converter: WxConverter,
}

impl<'a> EquivalentResolver<'a> {
    pub fn new(
        lexicons: &'a Lexicons,
        config: &'a AlignConfig,
        similarity: &'a dyn Similarity,
        transliterator: &'a dyn Transliterator,
    ) -> Self {
        Self {
            lexicons,
            config,
            similarity,
            transliterator,
            converter: WxConverter::new(),
        }
    }

    /// The Devanagari equivalent, or an empty string when nothing matched.
    pub fn resolve(&self, lookup: &Lookup<'_>, sentence: &SentenceContext<'_>) -> Result<String> {
        Ok(self
            .resolve_wx(lookup, sentence)?
            .map(|r| self.converter.to_devanagari(&r.wx))
            .unwrap_or_default())
    }

    /// Runs the strategies in order and attaches a trailing postposition to
    /// the first result.
    pub fn resolve_wx(
        &self,
        lookup: &Lookup<'_>,
        sentence: &SentenceContext<'_>,
    ) -> Result<Option<Resolution>> {
        let matcher = SentenceMatcher::new(
            &sentence.tokens,
            sentence.root_index,
            self.similarity,
            self.config.fuzzy_threshold,
        );
        for &strategy in Strategy::sequence(lookup.sense, lookup.grouping) {
            let found = match strategy {
                Strategy::VerbTam => self.verb_tam(lookup, &matcher),
                Strategy::Dictionary => self.dictionary(lookup, &matcher),
                Strategy::Transliteration => self.transliteration(lookup, &matcher)?,
            };
            if let Some(resolution) = found {
                debug!(
                    root = %lookup.sense.root,
                    ?strategy,
                    stage = ?resolution.stage,
                    hindi = %resolution.wx,
                    "resolved Hindi equivalent"
                );
                return Ok(Some(self.attach_postposition(resolution, &matcher)));
            }
        }
        debug!(root = %lookup.sense.root, "no Hindi equivalent");
        Ok(None)
    }

    /// Candidates from the root alone: bilingual then controlled dictionary.
    /// Placeholder roots have none.
    pub fn root_candidates(&self, root: &str) -> Vec<String> {
        let mut candidates = Vec::new();
        if root.is_empty() || self.config.is_placeholder(root) {
            return candidates;
        }
        candidates.extend(self.lexicons.bilingual.lookup(&root.to_lowercase()).iter().cloned());
        candidates.extend(self.lexicons.controlled.lookup(root).map(str::to_string));
        dedup(candidates)
    }

    /// Root candidates plus the bilingual entries of every surface token.
    pub fn dictionary_candidates(&self, lookup: &Lookup<'_>) -> Vec<String> {
        let mut candidates = self.root_candidates(&lookup.sense.root);
        for token in self.surface_tokens(lookup) {
            candidates.extend(self.lexicons.bilingual.lookup(token).iter().cloned());
        }
        dedup(candidates)
    }

    /// Surface tokens worth a lookup of their own: no stop words, not the root.
    fn surface_tokens<'l>(&self, lookup: &Lookup<'l>) -> Vec<&'l str> {
        let root = lookup.sense.root.to_lowercase();
        lookup
            .surface_form
            .split(|c: char| c.is_whitespace() || c == '~')
            .filter(|t| !t.is_empty())
            .filter(|t| !self.config.is_stop_word(t) && t.to_lowercase() != root)
            .collect()
    }

    fn verb_tam(&self, lookup: &Lookup<'_>, matcher: &SentenceMatcher<'_>) -> Option<Resolution> {
        let anchor = matcher.find(&self.root_candidates(&lookup.sense.root))?;
        let Hit { text, end, stage } = anchor;
        let Some(anchor_end) = end else {
            return Some(Resolution {
                wx: text,
                strategy: Strategy::VerbTam,
                stage,
                end: None,
            });
        };

        let tokens = matcher.tokens();
        let start = anchor_end + 1;
        for width in (1..=self.config.tam_window).rev() {
            let stop = start + width;
            if stop > tokens.len() {
                continue;
            }
            let tam = tokens[start..stop].join("_");
            if self.lexicons.tam.contains(&tam) {
                return Some(Resolution {
                    wx: format!("{text}{}{tam}", self.config.joiner),
                    strategy: Strategy::VerbTam,
                    stage,
                    end: Some(stop - 1),
                });
            }
        }
        Some(Resolution {
            wx: text,
            strategy: Strategy::VerbTam,
            stage,
            end: Some(anchor_end),
        })
    }

    fn dictionary(&self, lookup: &Lookup<'_>, matcher: &SentenceMatcher<'_>) -> Option<Resolution> {
        let hit = matcher.find(&self.dictionary_candidates(lookup))?;
        Some(Resolution {
            wx: hit.text,
            strategy: Strategy::Dictionary,
            stage: hit.stage,
            end: hit.end,
        })
    }

    fn transliteration(
        &self,
        lookup: &Lookup<'_>,
        matcher: &SentenceMatcher<'_>,
    ) -> Result<Option<Resolution>> {
        let root = lookup.sense.root.as_str();
        let mut words: Vec<&str> = self.surface_tokens(lookup);
        if self.config.transliterates_root(root) {
            words.push(root);
        }

        let mut hits: Vec<Hit> = Vec::new();
        let mut seen_words = Vec::new();
        for word in words {
            let key = word.to_lowercase();
            if seen_words.contains(&key) {
                continue;
            }
            seen_words.push(key);

            let spellings = self.transliterator.transliterate(
                word,
                self.config.transliteration_top_k,
                self.config.transliteration_beam_width,
            )?;
            let candidates = dedup(
                spellings
                    .iter()
                    .map(|s| self.converter.to_wx(s))
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
            if let Some(hit) = matcher.find(&candidates) {
                debug!(word, hindi = %hit.text, "transliteration hit");
                if !hits.iter().any(|h| h.text == hit.text) {
                    hits.push(hit);
                }
            }
        }

        let Some(last) = hits.last() else {
            return Ok(None);
        };
        Ok(Some(Resolution {
            wx: hits
                .iter()
                .map(|h| h.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            strategy: Strategy::Transliteration,
            stage: hits[0].stage,
            end: last.end,
        }))
    }

    fn attach_postposition(&self, mut resolution: Resolution, matcher: &SentenceMatcher<'_>) -> Resolution {
        let next = resolution
            .end
            .and_then(|end| matcher.tokens().get(end + 1))
            .copied();
        if let Some(post) = next.filter(|p| self.config.postpositions.contains(*p)) {
            resolution.wx = format!("{}{}{}", resolution.wx, self.config.joiner, post);
            resolution.end = resolution.end.map(|e| e + 1);
        }
        resolution
    }
}

/// Removes repeats, keeping the first occurrence.
fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
