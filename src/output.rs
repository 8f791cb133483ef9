// File: src/output.rs
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::core::types::{AlignedSentence, CorpusAlignment};
use crate::error::Result;
use crate::persistence::write_atomic;

pub const SENTENCE_DELIMITER: &str = "#########################";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Tab-separated records with `#` delimiters between sentences.
    #[default]
    Text,
    /// One JSON object per aligned sentence.
    Jsonl,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "jsonl" | "json" => Ok(OutputFormat::Jsonl),
            other => Err(format!("unknown output format '{other}' (expected text or jsonl)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Jsonl => "jsonl",
        })
    }
}

pub fn write_text_sentence(w: &mut dyn Write, sentence: &AlignedSentence) -> io::Result<()> {
    write!(w, "{}\n{}\n", sentence.english, sentence.hindi)?;
    for record in &sentence.records {
        write!(w, "\n{}\n", record.fields().join("\t"))?;
    }
    write!(w, "\n{SENTENCE_DELIMITER}\n")
}

pub fn write_text(w: &mut dyn Write, alignment: &CorpusAlignment) -> io::Result<()> {
    for sentence in &alignment.sentences {
        write_text_sentence(w, sentence)?;
    }
    Ok(())
}

pub fn write_jsonl(w: &mut dyn Write, alignment: &CorpusAlignment) -> io::Result<()> {
    for sentence in &alignment.sentences {
        serde_json::to_writer(&mut *w, sentence)?;
        writeln!(w)?;
    }
    Ok(())
}

/// Replaces `path` with the aligned sentences in `format`. Skipped
/// sentences are not written.
pub fn write_alignment(path: &Path, format: OutputFormat, alignment: &CorpusAlignment) -> Result<()> {
    write_atomic(path, |w| match format {
        OutputFormat::Text => write_text(w, alignment),
        OutputFormat::Jsonl => write_jsonl(w, alignment),
    })?;
    info!(
        path = %path.display(),
        %format,
        sentences = alignment.sentences.len(),
        "wrote alignment"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AlignedRecord, AnnotationTuple};

    fn sample() -> CorpusAlignment {
        let tuple = AnnotationTuple {
            lexical_unit: "house.n.01".into(),
            role: "Location".into(),
            surface_form: "house".into(),
            position_count: "[3]".into(),
        };
        CorpusAlignment {
            sentences: vec![AlignedSentence {
                index: 0,
                english: "In the house.".into(),
                hindi_wx: "Gara meM".into(),
                hindi: "घर में".into(),
                records: vec![
                    AlignedRecord::from_tuple(&tuple, String::new(), "घर_में".into()),
                    AlignedRecord::empty(),
                ],
            }],
            skipped: Vec::new(),
        }
    }

    #[test]
    fn text_layout_matches_corpus_format() {
        let mut buf = Vec::new();
        write_text(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "In the house.\nघर में\n\
             \nhouse.n.01\tLocation\t%%English\thouse\t[3]\t\t%%Hindi\tघर_में\n\
             \n\t\t%%English\t\t\t\t%%Hindi\t\n\
             \n#########################\n"
        );
    }

    #[test]
    fn jsonl_writes_one_object_per_sentence() {
        let mut buf = Vec::new();
        write_jsonl(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["hindi_wx"], "Gara meM");
        assert_eq!(value["records"][0]["hindi_equivalent"], "घर_में");
    }

    #[test]
    fn format_names_parse() {
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("jsonl".parse::<OutputFormat>(), Ok(OutputFormat::Jsonl));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
