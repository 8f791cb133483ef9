pub mod similarity;

pub use similarity::{is_fuzzy_match, LevenshteinRatio, Similarity};
