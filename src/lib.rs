// src/lib.rs

pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod fuzzy;
pub mod lexicon;
pub mod lwg;
pub mod output;
pub mod persistence;
pub mod translit;

pub use crate::config::AlignConfig;
pub use crate::core::engine::AlignEngine;
pub use crate::core::types::{AlignedRecord, AlignedSentence, CorpusAlignment, SentencePair};
pub use crate::error::{AlignError, AnnotationError};
pub use crate::lexicon::{LexiconPaths, Lexicons};
