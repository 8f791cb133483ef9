use align_core::core::types::{ENGLISH_MARKER, HINDI_MARKER};
use align_core::error::Result;
use align_core::lexicon::{BilingualDictionary, ControlledDictionary, MorphDictionary, TamSet};
use align_core::lwg::VerbChunker;
use align_core::translit::Transliterator;
use align_core::{AlignConfig, AlignEngine, AlignError, Lexicons, SentencePair};
use std::path::Path;

/// Always returns the same verb chunks, panicking on sentences that ask it to.
struct FixedChunker(Vec<Vec<&'static str>>);

impl VerbChunker for FixedChunker {
    fn verb_chunks(&self, sentence: &str) -> Vec<Vec<String>> {
        if sentence.contains("explode") {
            panic!("chunker blew up");
        }
        self.0
            .iter()
            .map(|chunk| chunk.iter().map(|t| t.to_string()).collect())
            .collect()
    }
}

/// Knows no spellings; fails outright for `Paris`.
struct NoSpellings;

impl Transliterator for NoSpellings {
    fn transliterate(&self, word: &str, _top_k: usize, _beam_width: usize) -> Result<Vec<String>> {
        if word == "Paris" {
            return Err(AlignError::Transliteration {
                word: word.to_string(),
                message: "service unavailable".to_string(),
            });
        }
        Ok(Vec::new())
    }
}

fn lexicons(bilingual: &str, morph: &str, tam: &str) -> Lexicons {
    let origin = Path::new("inline");
    Lexicons {
        bilingual: BilingualDictionary::from_reader(bilingual.as_bytes(), origin).unwrap(),
        morph: MorphDictionary::from_reader(morph.as_bytes(), origin).unwrap(),
        tam: TamSet::from_reader(tam.as_bytes(), origin).unwrap(),
        ..Default::default()
    }
}

fn lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

fn engine(lex: Lexicons, chunks: Vec<Vec<&'static str>>) -> AlignEngine {
    AlignEngine::new(lex, AlignConfig::default())
        .with_chunker(FixedChunker(chunks))
        .with_transliterator(NoSpellings)
}

#[test]
fn verb_is_aligned_with_its_tam() {
    let lex = lexicons(
        "run\tBAganA\n",
        "BAgawA\tBAganA<cat:v><tam:wA>\n",
        "pres hE\n",
    );
    let engine = engine(lex, vec![vec!["runs"]]);
    let pair = SentencePair::new("He runs fast.", "vaha jalxI BAgawA hE");
    let sbn = lines("male.n.02  % He [0-2]\nrun.v.01  Agent -1% runs [3-7]");

    let sentence = engine.align_sentence(0, &sbn, &pair).unwrap();
    assert_eq!(sentence.hindi, "वह जल्दी भागता है");
    assert_eq!(sentence.records.len(), 2);

    let verb = &sentence.records[1];
    assert_eq!(verb.corrected_grouping, "runs");
    assert_eq!(verb.hindi_equivalent, "भागता_है");
    assert_eq!(
        verb.fields(),
        ["run.v.01", "Agent -1", ENGLISH_MARKER, "runs", "[3-7]", "runs", HINDI_MARKER, "भागता_है"]
    );

    // No dictionary entry and no spelling: resolved to nothing.
    assert_eq!(sentence.records[0].hindi_equivalent, "");
    assert_eq!(sentence.records[0].corrected_grouping, "");
}

#[test]
fn default_chunker_groups_auxiliary_and_verb() {
    let lex = lexicons(
        "run\tBAganA\n",
        "BAga\tBAganA<cat:v>\n",
        "prog rahA_hE\n",
    );
    let engine = AlignEngine::new(lex, AlignConfig::default()).with_transliterator(NoSpellings);
    let pair = SentencePair::new("He is running fast.", "vaha jalxI BAga rahA hE");
    let sbn = lines("run.v.01  Agent -1% is running [3-13]");

    let sentence = engine.align_sentence(0, &sbn, &pair).unwrap();
    let verb = &sentence.records[0];
    assert_eq!(verb.corrected_grouping, "is_running");
    assert_eq!(verb.hindi_equivalent, "भाग_रहा_है");
}

#[test]
fn non_content_and_malformed_lines_give_empty_equivalents() {
    let engine = engine(lexicons("not\tnahIM\n", "", ""), Vec::new());
    let pair = SentencePair::new("He did not leave.", "vaha nahIM gayA");
    let sbn = lines("NEGATION  % not [7-10]\ngarbage\nleave.v.01  Theme% leave [11-16]");

    let sentence = engine.align_sentence(3, &sbn, &pair).unwrap();
    assert_eq!(sentence.index, 3);
    assert_eq!(sentence.records.len(), 3);

    let negation = &sentence.records[0];
    assert_eq!(negation.lexical_unit, "NEGATION");
    assert_eq!(negation.hindi_equivalent, "");
    assert_eq!(negation.corrected_grouping, "");

    let broken = &sentence.records[1];
    assert_eq!(
        broken.fields(),
        ["", "", ENGLISH_MARKER, "", "", "", HINDI_MARKER, ""]
    );

    assert_eq!(sentence.records[2].hindi_equivalent, "");
}

#[test]
fn postposition_is_attached_to_the_noun() {
    let engine = engine(lexicons("house\tGara\n", "", ""), Vec::new());
    let pair = SentencePair::new("He is in the house.", "vaha Gara meM hE");
    let sbn = lines("house.n.01  Location% house [13-18]");

    let sentence = engine.align_sentence(0, &sbn, &pair).unwrap();
    assert_eq!(sentence.records[0].hindi_equivalent, "घर_में");
}

#[test]
fn count_mismatch_is_fatal() {
    let engine = engine(Lexicons::default(), Vec::new());
    let annotations = vec![lines("male.n.02  % He [0-2]")];
    let err = engine.align_corpus(&annotations, &[]).unwrap_err();
    assert!(matches!(
        err,
        AlignError::CountMismatch { annotations: 1, pairs: 0 }
    ));
}

#[test]
fn failing_sentences_are_skipped_and_the_rest_aligned() {
    let engine = engine(lexicons("house\tGara\n", "", ""), vec![vec!["explode"]]);
    let annotations = vec![
        lines("house.n.01  Location% house [13-18]"),
        lines("city.n.01  Location% Paris [3-8]"),
        lines("explode.v.01  % explode [4-11]"),
        lines("house.n.01  Theme% house [4-9]"),
    ];
    let pairs = vec![
        SentencePair::new("He is in the house.", "vaha Gara meM hE"),
        SentencePair::new("In Paris.", "perisa meM"),
        SentencePair::new("It will explode.", "vaha Pata jAegA"),
        SentencePair::new("A house.", "eka Gara"),
    ];

    let alignment = engine.align_corpus(&annotations, &pairs).unwrap();
    let aligned: Vec<usize> = alignment.sentences.iter().map(|s| s.index).collect();
    let skipped: Vec<usize> = alignment.skipped.iter().map(|s| s.index).collect();
    assert_eq!(aligned, [0, 3]);
    assert_eq!(skipped, [1, 2]);

    assert!(alignment.skipped[0].reason.contains("Paris"));
    assert!(alignment.skipped[1].reason.contains("panicked"));
    assert_eq!(alignment.skipped[1].pair, pairs[2]);
    assert_eq!(alignment.sentences[1].records[0].hindi_equivalent, "घर");
}

#[test]
fn fuzzy_match_needs_a_score_above_threshold() {
    // `Garo` scores 75 against `Gara`; `ladZakA`/`ladZake` scores 86.
    let engine = engine(lexicons("house\tGara\nboy\tladZakA\n", "", ""), Vec::new());
    let pair = SentencePair::new("The boy's house.", "ladZake kA Garo");
    let sbn = lines("boy.n.01  % boy [4-7]\nhouse.n.01  % house [10-15]");

    let sentence = engine.align_sentence(0, &sbn, &pair).unwrap();
    assert_eq!(sentence.records[0].hindi_equivalent, "ल\u{921}\u{93c}के");
    assert_eq!(sentence.records[1].hindi_equivalent, "");
}

#[test]
fn controlled_dictionary_supplies_candidates() {
    let mut lex = Lexicons::default();
    lex.controlled =
        ControlledDictionary::from_reader("tom\ttOma\nentity\tcIjZa\n".as_bytes(), Path::new("inline"))
            .unwrap();
    let engine = engine(lex, Vec::new());

    let pair = SentencePair::new("Tom left.", "tOma ne Gara CodZA");
    let sbn = lines("tom.n.01  Name% Tom [0-3]");
    let sentence = engine.align_sentence(0, &sbn, &pair).unwrap();
    assert_eq!(sentence.records[0].hindi_equivalent, "टौम_ने");

    // Placeholder roots are not looked up, even when the controlled
    // dictionary has an entry for them.
    let pair = SentencePair::new("Something fell.", "cIjZa gira gaI");
    let sbn = lines("entity.n.01  Theme% Something [0-9]");
    let sentence = engine.align_sentence(0, &sbn, &pair).unwrap();
    assert_eq!(sentence.records[0].hindi_equivalent, "");
}

#[test]
fn tam_outside_the_dictionary_leaves_the_fuzzy_anchor_alone() {
    // `BAgatA` is only a fuzzy match for `BAganA`, and the following `hE` is
    // not a known TAM, so the verb resolves to the bare anchor.
    let lex = lexicons("run\tBAganA\n", "", "pres wA\n");
    let engine = AlignEngine::new(lex, AlignConfig::default()).with_transliterator(NoSpellings);
    let pair = SentencePair::new("He is running fast", "vaha WIka waija BAgatA hE");
    let sbn = lines("run.v.01 Agent% running [0,1]");

    let sentence = engine.align_sentence(0, &sbn, &pair).unwrap();
    let verb = &sentence.records[0];
    assert_eq!(verb.corrected_grouping, "is_running");
    assert_eq!(verb.hindi_equivalent, "भागटा");
}
