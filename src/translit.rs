// File: src/translit.rs
use std::collections::HashSet;

use crate::core::converter::WxConverter;
use crate::error::Result;

/// English word -> candidate Devanagari spellings, best first.
pub trait Transliterator {
    fn transliterate(&self, word: &str, top_k: usize, beam_width: usize) -> Result<Vec<String>>;
}

/// Letter clusters and their WX renderings, most likely first.
/// Longer clusters are tried before shorter ones.
const CLUSTERS: [(&str, &[&str]); 25] = [
    ("tch", &["c"]),
    ("sch", &["S"]),
    ("sh", &["S"]),
    ("ch", &["c", "C"]),
    ("th", &["W", "w", "T"]),
    ("ph", &["P"]),
    ("kh", &["K"]),
    ("gh", &["G", "g"]),
    ("bh", &["B"]),
    ("dh", &["X", "D"]),
    ("jh", &["J"]),
    ("ck", &["k"]),
    ("ng", &["Mg", "ng"]),
    ("qu", &["kv"]),
    ("ee", &["I"]),
    ("oo", &["U"]),
    ("ou", &["O", "U"]),
    ("ai", &["E", "e"]),
    ("ay", &["e", "E"]),
    ("au", &["O"]),
    ("ei", &["I", "e"]),
    ("ie", &["I"]),
    ("ea", &["I", "i"]),
    ("oa", &["o"]),
    ("aa", &["A"]),
];

fn letter(c: char) -> &'static [&'static str] {
    match c {
        'a' => &["a", "A", "e"],
        'b' => &["b"],
        'c' => &["k", "s"],
        'd' => &["d", "x"],
        'e' => &["e", "a", "i"],
        'f' => &["P"],
        'g' => &["g", "j"],
        'h' => &["h", ""],
        'i' => &["i", "I", "Ai"],
        'j' => &["j"],
        'k' => &["k"],
        'l' => &["l"],
        'm' => &["m"],
        'n' => &["n"],
        'o' => &["o", "O", "A"],
        'p' => &["p"],
        'q' => &["k"],
        'r' => &["r"],
        's' => &["s"],
        't' => &["t", "w"],
        'u' => &["u", "a", "U"],
        'v' | 'w' => &["v"],
        'x' => &["ks"],
        'y' => &["y", "i"],
        'z' => &["j"],
        _ => &[],
    }
}

fn is_vowel_letter(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Each step away from the preferred rendering of a cluster costs this much.
const ALTERNATIVE_PENALTY: f64 = 0.7;

/// Rule-based phonetic transliteration: the word is split into letter
/// clusters and a beam search over their WX renderings keeps the
/// `beam_width` cheapest spellings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneticTransliterator {
    converter: WxConverter,
}

impl PhoneticTransliterator {
    pub fn new() -> Self {
        Self::default()
    }

    fn segments(word: &str) -> Vec<&'static [&'static str]> {
        let chars: Vec<char> = word
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        let mut segments = Vec::new();
        let mut p = 0;
        while p < chars.len() {
            let cluster = CLUSTERS.iter().find(|(cluster, _)| {
                let n = cluster.len();
                p + n <= chars.len() && chars[p..p + n].iter().copied().eq(cluster.chars())
            });
            if let Some((cluster, renderings)) = cluster {
                segments.push(*renderings);
                p += cluster.len();
                continue;
            }
            // Doubled consonants are pronounced once.
            let doubled = p > 0 && chars[p] == chars[p - 1] && !is_vowel_letter(chars[p]);
            if !doubled {
                segments.push(letter(chars[p]));
            }
            p += 1;
        }
        segments
    }

    /// WX spellings with their costs, cheapest first.
    pub fn wx_candidates(&self, word: &str, beam_width: usize) -> Vec<(String, f64)> {
        let beam_width = beam_width.max(1);
        let mut beam: Vec<(String, f64)> = vec![(String::new(), 0.0)];
        for renderings in Self::segments(word) {
            if renderings.is_empty() {
                continue;
            }
            let mut next: Vec<(String, f64)> = Vec::with_capacity(beam.len() * renderings.len());
            for (prefix, cost) in &beam {
                for (rank, wx) in renderings.iter().enumerate() {
                    next.push((
                        format!("{prefix}{wx}"),
                        cost + rank as f64 * ALTERNATIVE_PENALTY,
                    ));
                }
            }
            next.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
            let mut seen = HashSet::new();
            next.retain(|(wx, _)| seen.insert(wx.clone()));
            next.truncate(beam_width);
            beam = next;
        }
        beam.retain(|(wx, _)| !wx.is_empty());
        beam
    }
}

impl Transliterator for PhoneticTransliterator {
    fn transliterate(&self, word: &str, top_k: usize, beam_width: usize) -> Result<Vec<String>> {
        Ok(self
            .wx_candidates(word, beam_width)
            .into_iter()
            .take(top_k)
            .map(|(wx, _)| self.converter.to_devanagari(&wx))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_spelling_comes_first() {
        let t = PhoneticTransliterator::new();
        let out = t.transliterate("Jon", 5, 10).unwrap();
        assert_eq!(out[0], "जोन");
        assert!(out.contains(&"जौन".to_string()));
    }

    #[test]
    fn clusters_and_doubled_letters() {
        let t = PhoneticTransliterator::new();
        let best = &t.wx_candidates("Shell", 3)[0];
        assert_eq!(best.0, "Sel");
        let best = &t.wx_candidates("Google", 3)[0];
        assert_eq!(best.0, "gUgle");
    }

    #[test]
    fn respects_top_k_and_beam_width() {
        let t = PhoneticTransliterator::new();
        assert_eq!(t.transliterate("Madrid", 5, 10).unwrap().len(), 5);
        assert_eq!(t.transliterate("Madrid", 5, 1).unwrap().len(), 1);
    }

    #[test]
    fn empty_or_symbolic_input() {
        let t = PhoneticTransliterator::new();
        assert!(t.transliterate("", 5, 10).unwrap().is_empty());
        assert!(t.transliterate("42", 5, 10).unwrap().is_empty());
    }
}
