// File: src/lexicon.rs
//
// Flat-file dictionaries, parsed once at startup and read-only afterwards.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{AlignError, Result};

/// Second halves of `stem_lightverb` Hindi entries that are dropped,
/// keeping only the stem.
const LIGHT_VERBS: [&str; 5] = ["kara", "karanA", "ho", "honA", "nA"];

fn read_lines<R: BufRead>(reader: R, path: &Path) -> Result<Vec<String>> {
    reader
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| AlignError::io(path, e))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| AlignError::io(path, e))
}

/// English root -> candidate Hindi words, in file order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BilingualDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl BilingualDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_reader(open(path)?, path)
    }

    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut dict = Self::new();
        let mut skipped = 0usize;
        for (n, line) in read_lines(reader, path)?.iter().enumerate() {
            if !dict.insert_line(line) {
                warn!(line = n + 1, content = %line, "skipping malformed bilingual dictionary line");
                skipped += 1;
            }
        }
        info!(entries = dict.entries.len(), skipped, path = %path.display(), "loaded bilingual dictionary");
        Ok(dict)
    }

    /// Adds one `english[_category]<TAB>h1/h2/...` line. Comments and blank
    /// lines are accepted and ignored. Returns false for a line without a tab.
    /// Candidates for a repeated key are appended, never replaced.
    pub fn insert_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return true;
        }
        let Some((english, hindi)) = line.split_once('\t') else {
            return false;
        };
        let english = english.trim();
        let word = english.split_once('_').map_or(english, |(w, _)| w).to_lowercase();
        if word.is_empty() {
            return false;
        }
        let candidates = self.entries.entry(word).or_default();
        candidates.extend(
            hindi
                .split('/')
                .map(normalize_hindi_entry)
                .filter(|h| !h.is_empty()),
        );
        true
    }

    pub fn lookup(&self, english: &str) -> &[String] {
        self.entries
            .get(&english.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `stem_kara` -> `stem`, `two_words` -> `two words`, three or more parts
/// stay one token.
fn normalize_hindi_entry(entry: &str) -> String {
    let entry = entry.trim();
    let parts: Vec<&str> = entry.split('_').collect();
    match parts.as_slice() {
        [stem, tail] if LIGHT_VERBS.contains(tail) => stem.to_string(),
        [first, second] => format!("{first} {second}").trim().to_string(),
        _ => entry.to_string(),
    }
}

/// Curated one-meaning-per-word overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlledDictionary {
    entries: HashMap<String, String>,
}

impl ControlledDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_reader(open(path)?, path)
    }

    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut dict = Self::new();
        for (n, line) in read_lines(reader, path)?.iter().enumerate() {
            if !dict.insert_line(line) {
                warn!(line = n + 1, content = %line, "skipping malformed controlled dictionary line");
            }
        }
        info!(entries = dict.entries.len(), path = %path.display(), "loaded controlled dictionary");
        Ok(dict)
    }

    /// Later lines for the same word overwrite earlier ones.
    pub fn insert_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return true;
        }
        match line.split_once('\t') {
            Some((english, hindi)) if !english.trim().is_empty() && !hindi.trim().is_empty() => {
                self.entries
                    .insert(english.trim().to_string(), hindi.trim().to_string());
                true
            }
            _ => false,
        }
    }

    pub fn lookup(&self, english: &str) -> Option<&str> {
        self.entries.get(english).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Valid Hindi tense-aspect-modality suffix sequences, `_`-joined.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TamSet {
    tams: HashSet<String>,
}

impl TamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_reader(open(path)?, path)
    }

    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut set = Self::new();
        for (n, line) in read_lines(reader, path)?.iter().enumerate() {
            if !set.insert_line(line) {
                warn!(line = n + 1, content = %line, "skipping malformed TAM dictionary line");
            }
        }
        info!(entries = set.tams.len(), path = %path.display(), "loaded TAM dictionary");
        Ok(set)
    }

    /// Adds one `info  tam` line. A TAM starting with `0` loses everything
    /// up to and including its first `_`.
    pub fn insert_line(&mut self, line: &str) -> bool {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let tam = match fields.as_slice() {
            [] => return true,
            [_, tam] => *tam,
            _ => return false,
        };
        let tam = if tam.starts_with('0') {
            match tam.split_once('_') {
                Some((_, rest)) if !rest.is_empty() => rest,
                _ => return false,
            }
        } else {
            tam
        };
        self.tams.insert(tam.to_string());
        true
    }

    pub fn insert(&mut self, tam: impl Into<String>) {
        self.tams.insert(tam.into());
    }

    pub fn contains(&self, tam: &str) -> bool {
        self.tams.contains(tam)
    }

    pub fn len(&self) -> usize {
        self.tams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tams.is_empty()
    }
}

/// Hindi surface word -> its morphological roots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MorphDictionary {
    roots: HashMap<String, BTreeSet<String>>,
}

impl MorphDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_reader(open(path)?, path)
    }

    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut dict = Self::new();
        for (n, line) in read_lines(reader, path)?.iter().enumerate() {
            if !dict.insert_line(line) {
                warn!(line = n + 1, content = %line, "skipping malformed morph dictionary line");
            }
        }
        info!(entries = dict.roots.len(), path = %path.display(), "loaded Hindi morph dictionary");
        Ok(dict)
    }

    /// Adds one `surface<TAB>analysis/analysis/...` line, e.g.
    /// `laDakoM\tlaDakA<cat:n><case:o>/laDakA<cat:n><num:p>`.
    pub fn insert_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return true;
        }
        let Some((surface, analyses)) = line.split_once('\t') else {
            return false;
        };
        let roots: BTreeSet<String> = analyses
            .split('/')
            .filter_map(|a| a.split_once('<').map(|(root, _)| root.trim()))
            .filter(|root| !root.is_empty())
            .map(str::to_string)
            .collect();
        self.roots.insert(surface.trim().to_string(), roots);
        true
    }

    pub fn insert<I, S>(&mut self, surface: impl Into<String>, roots: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roots
            .entry(surface.into())
            .or_default()
            .extend(roots.into_iter().map(Into::into));
    }

    pub fn roots(&self, surface: &str) -> impl Iterator<Item = &str> {
        self.roots
            .get(surface)
            .into_iter()
            .flat_map(|roots| roots.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// File locations of the four dictionaries.
#[derive(Debug, Clone)]
pub struct LexiconPaths {
    pub bilingual: PathBuf,
    pub controlled: PathBuf,
    pub tam: PathBuf,
    pub morph: PathBuf,
}

/// Every dictionary the resolver consults, loaded once per run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexicons {
    pub bilingual: BilingualDictionary,
    pub controlled: ControlledDictionary,
    pub tam: TamSet,
    pub morph: MorphDictionary,
}

impl Lexicons {
    pub fn load(paths: &LexiconPaths) -> Result<Self> {
        Ok(Self {
            bilingual: BilingualDictionary::from_path(&paths.bilingual)?,
            controlled: ControlledDictionary::from_path(&paths.controlled)?,
            tam: TamSet::from_path(&paths.tam)?,
            morph: MorphDictionary::from_path(&paths.morph)?,
        })
    }
}
