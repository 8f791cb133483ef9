// src/config.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{AlignError, Result};

/// Tunables for the Hindi equivalent cascade.
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Fuzzy matches need a similarity strictly greater than this (0-100).
    pub fuzzy_threshold: u8,
    /// Maximum number of tokens after a verb anchor tried as a TAM span.
    pub tam_window: usize,
    /// Joins a verb anchor to its TAM span and a word to its postposition.
    pub joiner: String,
    pub transliteration_top_k: usize,
    pub transliteration_beam_width: usize,
    /// Surface tokens never looked up on their own.
    pub stop_words: HashSet<String>,
    /// Case markers re-attached to the word they follow.
    pub postpositions: HashSet<String>,
    /// Roots that carry no dictionary meaning (`entity`, `time`, ...).
    pub placeholder_roots: HashSet<String>,
    /// Placeholders that are still handed to the transliteration fallback.
    pub transliterable_placeholders: HashSet<String>,
}

fn set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 77,
            tam_window: 4,
            joiner: "_".to_string(),
            transliteration_top_k: 5,
            transliteration_beam_width: 10,
            stop_words: set(&[
                "a", "an", "the", "of", "in", "on", "at", "to", "for", "from", "by", "with",
                "into", "onto", "about", "as", "over", "under",
            ]),
            postpositions: set(&["meM", "se", "ne", "ko", "ke", "para", "vAlA"]),
            placeholder_roots: set(&["entity", "time", "person"]),
            transliterable_placeholders: set(&["company"]),
        }
    }
}

impl AlignConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AlignError::io(path, e))?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn is_placeholder(&self, root: &str) -> bool {
        self.placeholder_roots.contains(root)
    }

    /// Whether a root may be handed to the transliteration service.
    pub fn transliterates_root(&self, root: &str) -> bool {
        !root.is_empty()
            && (!self.is_placeholder(root) || self.transliterable_placeholders.contains(root))
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(&token.to_lowercase())
    }
}
