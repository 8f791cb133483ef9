// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Why an annotation line could not be split into its four fields.
/// A failed line never aborts its sentence; the aligner substitutes empty
/// fields and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error("annotation line is empty")]
    Empty,

    #[error("no `%` role terminator in annotation line: {line}")]
    MissingRoleMarker { line: String },

    #[error("no `[` position block after the surface form: {line}")]
    MissingSurface { line: String },

    #[error("annotation line does not match `LEX ROLE% SURFACE [REST`: {line}")]
    Malformed { line: String },
}

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("annotation count {annotations} and sentence-pair count {pairs} do not match")]
    CountMismatch { annotations: usize, pairs: usize },

    #[error("malformed translation CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("lexicon snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("transliteration of `{word}` failed: {message}")]
    Transliteration { word: String, message: String },

    #[error("alignment of sentence {index} panicked: {message}")]
    Panicked { index: usize, message: String },
}

impl AlignError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AlignError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AlignError>;
