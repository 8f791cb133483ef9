// File: src/fuzzy/similarity.rs

/// A string similarity on a 0-100 scale, 100 meaning identical.
pub trait Similarity {
    fn score(&self, a: &str, b: &str) -> u8;
}

/// Levenshtein ratio over characters: `round(100 * (1 - distance / max_len))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinRatio;

impl Similarity for LevenshteinRatio {
    fn score(&self, a: &str, b: &str) -> u8 {
        if a.is_empty() && b.is_empty() {
            return 100;
        }
        let ratio = strsim::normalized_levenshtein(a, b);
        (ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

/// Whether `a` and `b` are close enough to count as a fuzzy match.
/// The threshold itself is excluded.
pub fn is_fuzzy_match(sim: &dyn Similarity, a: &str, b: &str, threshold: u8) -> bool {
    sim.score(a, b) > threshold
}
