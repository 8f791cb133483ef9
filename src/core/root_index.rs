// src/core/root_index.rs
use indexmap::IndexMap;

use crate::lexicon::MorphDictionary;

/// Root -> surface word for one Hindi sentence.
///
/// Built fresh for every sentence and dropped with it. Iteration follows the
/// order in which roots were first seen. When two words share a root the
/// later word wins; that ambiguity is tolerated, not reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HindiRootIndex {
    roots: IndexMap<String, String>,
}

impl HindiRootIndex {
    pub fn build(hindi_sentence: &str, morph: &MorphDictionary) -> Self {
        let mut roots = IndexMap::new();
        for word in hindi_sentence.split_whitespace() {
            for root in morph.roots(word) {
                roots.insert(root.to_string(), word.to_string());
            }
        }
        Self { roots }
    }

    pub fn surface(&self, root: &str) -> Option<&str> {
        self.roots.get(root).map(String::as_str)
    }

    /// (root, surface word) pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.roots.iter().map(|(r, w)| (r.as_str(), w.as_str()))
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
