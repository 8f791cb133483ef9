use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{error, info, warn};

use crate::config::AlignConfig;
use crate::core::annotation::parse_line;
use crate::core::converter::WxConverter;
use crate::core::resolver::{EquivalentResolver, Lookup, SentenceContext};
use crate::core::root_index::HindiRootIndex;
use crate::core::types::{
    AlignedRecord, AlignedSentence, CorpusAlignment, SentenceAnnotations, SentencePair,
    SkippedSentence,
};
use crate::error::{AlignError, Result};
use crate::fuzzy::{LevenshteinRatio, Similarity};
use crate::lexicon::Lexicons;
use crate::lwg::{resolve_lwg, RuleChunker, VerbChunker};
use crate::translit::{PhoneticTransliterator, Transliterator};

// The aligner is composed of the lexicons plus three pluggable capabilities.
pub struct AlignEngine {
    pub lexicons: Lexicons,
    pub config: AlignConfig,
    chunker: Box<dyn VerbChunker>,
    transliterator: Box<dyn Transliterator>,
    similarity: Box<dyn Similarity>,
    converter: WxConverter,
}

impl AlignEngine {
    pub fn new(lexicons: Lexicons, config: AlignConfig) -> Self {
        Self {
            lexicons,
            config,
            chunker: Box::new(RuleChunker::new()),
            transliterator: Box::new(PhoneticTransliterator::new()),
            similarity: Box::new(LevenshteinRatio),
            converter: WxConverter::new(),
        }
    }

    pub fn with_chunker(mut self, chunker: impl VerbChunker + 'static) -> Self {
        self.chunker = Box::new(chunker);
        self
    }

    pub fn with_transliterator(mut self, transliterator: impl Transliterator + 'static) -> Self {
        self.transliterator = Box::new(transliterator);
        self
    }

    pub fn with_similarity(mut self, similarity: impl Similarity + 'static) -> Self {
        self.similarity = Box::new(similarity);
        self
    }

    pub fn resolver(&self) -> EquivalentResolver<'_> {
        EquivalentResolver::new(
            &self.lexicons,
            &self.config,
            self.similarity.as_ref(),
            self.transliterator.as_ref(),
        )
    }

    /// Aligns every annotation line of one sentence. Malformed lines become
    /// empty records; only a failing capability (e.g. transliteration) makes
    /// the whole sentence fail.
    pub fn align_sentence(
        &self,
        index: usize,
        lines: &[String],
        pair: &SentencePair,
    ) -> Result<AlignedSentence> {
        let root_index = HindiRootIndex::build(&pair.hindi, &self.lexicons.morph);
        let context = SentenceContext::new(&pair.hindi, &root_index);
        let resolver = self.resolver();

        let mut records = Vec::with_capacity(lines.len());
        for line in lines {
            let tuple = match parse_line(line) {
                Ok(tuple) => tuple,
                Err(e) => {
                    warn!(sentence = index, error = %e, "malformed annotation line");
                    records.push(AlignedRecord::empty());
                    continue;
                }
            };

            let Some(sense) = tuple.sense_key() else {
                records.push(AlignedRecord::from_tuple(&tuple, String::new(), String::new()));
                continue;
            };

            let grouping = if sense.is_verb() {
                resolve_lwg(&sense.root, &pair.english, self.chunker.as_ref())
            } else {
                Vec::new()
            };
            let hindi = resolver.resolve(
                &Lookup {
                    sense: &sense,
                    surface_form: &tuple.surface_form,
                    grouping: &grouping,
                },
                &context,
            )?;
            records.push(AlignedRecord::from_tuple(&tuple, grouping.join("_"), hindi));
        }

        Ok(AlignedSentence {
            index,
            english: pair.english.clone(),
            hindi_wx: pair.hindi.clone(),
            hindi: self.converter.to_devanagari(&pair.hindi),
            records,
        })
    }

    /// Aligns sentence `i` of `annotations` with pair `i`. The two inputs
    /// must have the same length. A sentence that fails or panics is logged
    /// and skipped; the rest of the corpus is still aligned.
    pub fn align_corpus(
        &self,
        annotations: &[SentenceAnnotations],
        pairs: &[SentencePair],
    ) -> Result<CorpusAlignment> {
        if annotations.len() != pairs.len() {
            return Err(AlignError::CountMismatch {
                annotations: annotations.len(),
                pairs: pairs.len(),
            });
        }

        let mut alignment = CorpusAlignment::default();
        for (index, (lines, pair)) in annotations.iter().zip(pairs).enumerate() {
            let outcome = catch_unwind(AssertUnwindSafe(|| self.align_sentence(index, lines, pair)))
                .unwrap_or_else(|panic| {
                    Err(AlignError::Panicked {
                        index,
                        message: panic_message(panic.as_ref()),
                    })
                });
            match outcome {
                Ok(sentence) => alignment.sentences.push(sentence),
                Err(e) => {
                    error!(
                        sentence = index,
                        english = %pair.english,
                        hindi = %pair.hindi,
                        error = %e,
                        "skipping sentence"
                    );
                    alignment.skipped.push(SkippedSentence {
                        index,
                        pair: pair.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            aligned = alignment.sentences.len(),
            skipped = alignment.skipped.len(),
            "corpus alignment finished"
        );
        Ok(alignment)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
