// File: src/corpus.rs
//
// PMB data directories and the translated sentence file.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::annotation::clean_lines;
use crate::core::types::{SentenceAnnotations, SentencePair};
use crate::error::{AlignError, Result};
use crate::persistence::write_atomic;

pub const SBN_FILE: &str = "en.drs.sbn";
pub const RAW_FILE: &str = "en.raw";
pub const TRANSLATION_INPUT_FILE: &str = "eng_raw_sen.txt";

/// One PMB document: its SBN lines and raw English sentence.
#[derive(Debug, Clone)]
pub struct CorpusDocument {
    pub dir: PathBuf,
    pub annotations: SentenceAnnotations,
    pub english: String,
}

/// Reads every leaf directory under `root` (directories without
/// subdirectories), in sorted path order so runs are reproducible across
/// platforms. Leaves without an SBN file are skipped.
pub fn read_corpus_dir(root: &Path) -> Result<Vec<CorpusDocument>> {
    let mut leaves = Vec::new();
    collect_leaf_dirs(root, &mut leaves)?;

    let mut documents = Vec::with_capacity(leaves.len());
    for dir in leaves {
        let sbn = dir.join(SBN_FILE);
        if !sbn.is_file() {
            warn!(dir = %dir.display(), "no {SBN_FILE} in document directory, skipping");
            continue;
        }
        documents.push(CorpusDocument {
            annotations: read_sbn(&sbn)?,
            english: read_raw_sentence(&dir.join(RAW_FILE))?,
            dir,
        });
    }
    info!(documents = documents.len(), root = %root.display(), "read PMB corpus");
    Ok(documents)
}

fn collect_leaf_dirs(dir: &Path, leaves: &mut Vec<PathBuf>) -> Result<()> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| AlignError::io(dir, e))? {
        let entry = entry.map_err(|e| AlignError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        }
    }
    if subdirs.is_empty() {
        leaves.push(dir.to_path_buf());
        return Ok(());
    }
    subdirs.sort();
    for sub in subdirs {
        collect_leaf_dirs(&sub, leaves)?;
    }
    Ok(())
}

/// SBN lines with `%` comments and blank lines removed.
pub fn read_sbn(path: &Path) -> Result<SentenceAnnotations> {
    let text = fs::read_to_string(path).map_err(|e| AlignError::io(path, e))?;
    Ok(clean_lines(text.lines()))
}

pub fn read_raw_sentence(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|e| AlignError::io(path, e))?;
    Ok(text.trim().to_string())
}

/// Reads `english,hindi` rows. Bytes are decoded as ISO-8859-1, which is
/// lossless for WX. A row with fewer than two fields keeps its place with
/// an empty Hindi side so indices stay aligned with the corpus.
pub fn read_translations(path: &Path) -> Result<Vec<SentencePair>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut pairs = Vec::new();
    for (row, record) in reader.byte_records().enumerate() {
        let record = record?;
        let field = |i: usize| record.get(i).map(latin1).unwrap_or_default();
        if record.len() < 2 {
            warn!(row = row + 1, "translation row has fewer than two fields");
        }
        pairs.push(SentencePair::new(field(0).trim(), field(1).trim()));
    }
    info!(pairs = pairs.len(), path = %path.display(), "read translated sentences");
    Ok(pairs)
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Writes the English sentences, one per line, for the translation step.
pub fn write_translation_input(dir: &Path, sentences: &[String]) -> Result<PathBuf> {
    let path = dir.join(TRANSLATION_INPUT_FILE);
    write_atomic(&path, |w| {
        for sentence in sentences {
            writeln!(w, "{sentence}")?;
        }
        Ok(())
    })?;
    info!(sentences = sentences.len(), path = %path.display(), "wrote sentences for translation");
    Ok(path)
}
