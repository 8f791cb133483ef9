// src/core/converter.rs
//
// WX is the single-letter romanization used by the dictionaries and the
// translated sentences. Output is emitted in Devanagari.

const HALANTA: char = '\u{094d}';
const NUKTA: char = '\u{093c}';

const CONSONANTS: [(char, char); 33] = [
    ('k', 'क'), ('K', 'ख'), ('g', 'ग'), ('G', 'घ'), ('f', 'ङ'),
    ('c', 'च'), ('C', 'छ'), ('j', 'ज'), ('J', 'झ'), ('F', 'ञ'),
    ('t', 'ट'), ('T', 'ठ'), ('d', 'ड'), ('D', 'ढ'), ('N', 'ण'),
    ('w', 'त'), ('W', 'थ'), ('x', 'द'), ('X', 'ध'), ('n', 'न'),
    ('p', 'प'), ('P', 'फ'), ('b', 'ब'), ('B', 'भ'), ('m', 'म'),
    ('y', 'य'), ('r', 'र'), ('l', 'ल'), ('v', 'व'), ('S', 'श'),
    ('R', 'ष'), ('s', 'स'), ('h', 'ह'),
];

/// (wx, independent vowel, dependent sign)
const VOWELS: [(char, char, char); 12] = [
    ('A', 'आ', '\u{093e}'),
    ('i', 'इ', '\u{093f}'),
    ('I', 'ई', '\u{0940}'),
    ('u', 'उ', '\u{0941}'),
    ('U', 'ऊ', '\u{0942}'),
    ('q', 'ऋ', '\u{0943}'),
    ('Q', 'ॠ', '\u{0944}'),
    ('L', 'ऌ', '\u{0962}'),
    ('e', 'ए', '\u{0947}'),
    ('E', 'ऐ', '\u{0948}'),
    ('o', 'ओ', '\u{094b}'),
    ('O', 'औ', '\u{094c}'),
];

const SIGNS: [(char, char); 3] = [('M', '\u{0902}'), ('H', '\u{0903}'), ('z', '\u{0901}')];

/// Stateless WX <-> Devanagari converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct WxConverter;

impl WxConverter {
    pub fn new() -> Self {
        Self
    }

    /// Converts WX to Devanagari. Characters outside WX (spaces, `_`,
    /// digits, punctuation) pass through unchanged.
    pub fn to_devanagari(&self, wx: &str) -> String {
        let mut result = String::with_capacity(wx.len() * 3);
        let mut last_was_consonant = false;

        for c in wx.chars() {
            if let Some(cons) = wx_consonant(c) {
                if last_was_consonant {
                    result.push(HALANTA);
                }
                result.push(cons);
                last_was_consonant = true;
                continue;
            }
            match c {
                'Z' if last_was_consonant => result.push(NUKTA),
                'a' => {
                    if !last_was_consonant {
                        result.push('अ');
                    }
                    last_was_consonant = false;
                }
                _ => {
                    if let Some((independent, sign)) = wx_vowel(c) {
                        result.push(if last_was_consonant { sign } else { independent });
                    } else if let Some(sign) = wx_sign(c) {
                        result.push(sign);
                    } else {
                        result.push(c);
                    }
                    last_was_consonant = false;
                }
            }
        }
        result
    }

    /// Converts Devanagari to WX. A consonant without a following vowel sign
    /// or halanta gets its inherent `a`, also at the end of a word.
    pub fn to_wx(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut pending_schwa = false;

        for c in text.chars().flat_map(decompose_nukta) {
            if let Some(wx) = dev_consonant(c) {
                if pending_schwa {
                    result.push('a');
                }
                result.push(wx);
                pending_schwa = true;
                continue;
            }
            match c {
                NUKTA => result.push('Z'),
                HALANTA => pending_schwa = false,
                _ => {
                    if let Some(wx) = dev_vowel_sign(c) {
                        result.push(wx);
                    } else {
                        if pending_schwa {
                            result.push('a');
                        }
                        if c == 'अ' {
                            result.push('a');
                        } else {
                            result.push(dev_independent_vowel(c).or_else(|| dev_sign(c)).unwrap_or(c));
                        }
                    }
                    pending_schwa = false;
                }
            }
        }
        if pending_schwa {
            result.push('a');
        }
        result
    }
}

fn wx_consonant(c: char) -> Option<char> {
    CONSONANTS.iter().find(|(wx, _)| *wx == c).map(|&(_, dev)| dev)
}

fn wx_vowel(c: char) -> Option<(char, char)> {
    VOWELS
        .iter()
        .find(|(wx, _, _)| *wx == c)
        .map(|&(_, independent, sign)| (independent, sign))
}

fn wx_sign(c: char) -> Option<char> {
    SIGNS.iter().find(|(wx, _)| *wx == c).map(|&(_, dev)| dev)
}

fn dev_consonant(c: char) -> Option<char> {
    CONSONANTS.iter().find(|(_, dev)| *dev == c).map(|&(wx, _)| wx)
}

fn dev_vowel_sign(c: char) -> Option<char> {
    VOWELS.iter().find(|(_, _, sign)| *sign == c).map(|&(wx, _, _)| wx)
}

fn dev_independent_vowel(c: char) -> Option<char> {
    VOWELS.iter().find(|(_, ind, _)| *ind == c).map(|&(wx, _, _)| wx)
}

fn dev_sign(c: char) -> Option<char> {
    SIGNS.iter().find(|(_, dev)| *dev == c).map(|&(wx, _)| wx)
}

/// Splits the precomposed nukta letters (U+0958..U+095F) into base + nukta.
fn decompose_nukta(c: char) -> Vec<char> {
    let base = match c {
        '\u{0958}' => 'क',
        '\u{0959}' => 'ख',
        '\u{095a}' => 'ग',
        '\u{095b}' => 'ज',
        '\u{095c}' => 'ड',
        '\u{095d}' => 'ढ',
        '\u{095e}' => 'फ',
        '\u{095f}' => 'य',
        _ => return vec![c],
    };
    vec![base, NUKTA]
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: [(&str, &str); 6] = [
        ("apane", "अपने"),
        ("badZe", "ब\u{0921}\u{093c}\u{0947}"),
        ("evaM", "एवं"),
        ("nahIM", "नहीं"),
        ("Gara meM", "घर में"),
        ("BAga_rahA", "भाग_रहा"),
    ];

    #[test]
    fn wx_to_devanagari() {
        let conv = WxConverter::new();
        for (wx, dev) in ITEMS {
            assert_eq!(conv.to_devanagari(wx), dev, "converting {wx}");
        }
    }

    #[test]
    fn devanagari_to_wx() {
        let conv = WxConverter::new();
        for (wx, dev) in ITEMS {
            assert_eq!(conv.to_wx(dev), wx, "converting {dev}");
        }
    }

    #[test]
    fn conjuncts_and_final_consonants() {
        let conv = WxConverter::new();
        assert_eq!(conv.to_devanagari("miSr"), "मिश्र");
        // The inherent vowel is written out on the way back.
        assert_eq!(conv.to_wx("मिश्र"), "miSra");
        assert_eq!(conv.to_wx("\u{095c}"), "dZa");
    }

    #[test]
    fn non_wx_characters_pass_through() {
        let conv = WxConverter::new();
        assert_eq!(conv.to_devanagari(""), "");
        assert_eq!(conv.to_devanagari("2024, "), "2024, ");
    }
}
