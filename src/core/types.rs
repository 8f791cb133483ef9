// src/core/types.rs
use serde::{Deserialize, Serialize};

pub const ENGLISH_MARKER: &str = "%%English";
pub const HINDI_MARKER: &str = "%%Hindi";

/// Part of speech carried by a WordNet-style sense key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensePos {
    Adjective,
    Verb,
    Noun,
    Adverb,
}

impl SensePos {
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'a' => Some(SensePos::Adjective),
            'v' => Some(SensePos::Verb),
            'n' => Some(SensePos::Noun),
            'r' => Some(SensePos::Adverb),
            _ => None,
        }
    }
}

/// A parsed `root.pos.NN` sense key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseKey {
    /// Everything before the first `.`.
    pub root: String,
    pub pos: SensePos,
    pub sense: String,
}

impl SenseKey {
    /// Returns `None` for non-content units (operators such as `NEGATION`,
    /// determiners). The suffix must be `.<a|v|n|r>.<two digits>`.
    pub fn parse(lexical_unit: &str) -> Option<Self> {
        let bytes = lexical_unit.as_bytes();
        let n = bytes.len();
        if n < 5 {
            return None;
        }
        let (dot1, tag, dot2) = (bytes[n - 5], bytes[n - 4], bytes[n - 3]);
        if dot1 != b'.' || dot2 != b'.' || !bytes[n - 2..].iter().all(u8::is_ascii_digit) {
            return None;
        }
        let pos = SensePos::from_tag(tag as char)?;
        let root = lexical_unit
            .split_once('.')
            .map(|(root, _)| root)
            .unwrap_or(lexical_unit);
        Some(Self {
            root: root.to_string(),
            pos,
            sense: lexical_unit[n - 2..].to_string(),
        })
    }

    pub fn is_verb(&self) -> bool {
        self.pos == SensePos::Verb
    }
}

/// One SBN line split into its fields. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationTuple {
    pub lexical_unit: String,
    pub role: String,
    pub surface_form: String,
    pub position_count: String,
}

impl AnnotationTuple {
    pub fn sense_key(&self) -> Option<SenseKey> {
        SenseKey::parse(&self.lexical_unit)
    }
}

/// An English sentence and its Hindi translation (WX romanization).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    pub english: String,
    pub hindi: String,
}

impl SentencePair {
    pub fn new(english: impl Into<String>, hindi: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            hindi: hindi.into(),
        }
    }
}

/// The raw SBN lines of one document, comments already dropped.
pub type SentenceAnnotations = Vec<String>;

/// One output row per annotation tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRecord {
    pub lexical_unit: String,
    pub role: String,
    pub english_marker: String,
    pub surface_form: String,
    pub position_count: String,
    /// Verb-phrase tokens joined by `_`; empty for non-verbs.
    pub corrected_grouping: String,
    pub hindi_marker: String,
    /// Devanagari.
    pub hindi_equivalent: String,
}

impl AlignedRecord {
    /// The record emitted for a line that could not be parsed.
    pub fn empty() -> Self {
        Self::from_tuple(
            &AnnotationTuple {
                lexical_unit: String::new(),
                role: String::new(),
                surface_form: String::new(),
                position_count: String::new(),
            },
            String::new(),
            String::new(),
        )
    }

    pub fn from_tuple(tuple: &AnnotationTuple, grouping: String, hindi: String) -> Self {
        Self {
            lexical_unit: tuple.lexical_unit.clone(),
            role: tuple.role.clone(),
            english_marker: ENGLISH_MARKER.to_string(),
            surface_form: tuple.surface_form.clone(),
            position_count: tuple.position_count.clone(),
            corrected_grouping: grouping,
            hindi_marker: HINDI_MARKER.to_string(),
            hindi_equivalent: hindi,
        }
    }

    pub fn fields(&self) -> [&str; 8] {
        [
            &self.lexical_unit,
            &self.role,
            &self.english_marker,
            &self.surface_form,
            &self.position_count,
            &self.corrected_grouping,
            &self.hindi_marker,
            &self.hindi_equivalent,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignedSentence {
    pub index: usize,
    pub english: String,
    pub hindi_wx: String,
    pub hindi: String,
    pub records: Vec<AlignedRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedSentence {
    pub index: usize,
    pub pair: SentencePair,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusAlignment {
    pub sentences: Vec<AlignedSentence>,
    pub skipped: Vec<SkippedSentence>,
}
