use align_core::core::annotation::parse_line;
use align_core::corpus::{read_corpus_dir, read_translations, write_translation_input};
use align_core::lexicon::{LexiconPaths, Lexicons};
use align_core::lwg::RuleChunker;
use align_core::output::{write_alignment, OutputFormat};
use align_core::persistence::load_or_build_lexicons;
use align_core::{AlignConfig, AlignEngine, CorpusAlignment};
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Aligns PMB semantic-role annotations with Hindi (WX) translations.
#[derive(Parser, Debug)]
#[command(name = "pmb-align", version, about)]
struct Cli {
    /// PMB data directory; every leaf holds en.drs.sbn and en.raw
    #[arg(long)]
    data: PathBuf,

    /// Where to write the English sentences for the translation step
    #[arg(long)]
    translation_dir: Option<PathBuf>,

    /// Translated sentences, `english,hindi` rows
    #[arg(long)]
    eng_hnd_sen: PathBuf,

    /// English-Hindi bilingual dictionary
    #[arg(long)]
    eng_hnd_dict: PathBuf,

    /// Controlled English-Hindi dictionary
    #[arg(long)]
    controlled_dict: PathBuf,

    /// Hindi TAM dictionary
    #[arg(long)]
    hnd_tam_dict: PathBuf,

    /// Hindi morphological analyses
    #[arg(long)]
    hnd_morph_dict: PathBuf,

    #[arg(long, default_value = "output.txt")]
    output: PathBuf,

    /// text or jsonl
    #[arg(long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON file overriding alignment tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Binary snapshot of the parsed dictionaries, reused across runs
    #[arg(long)]
    lexicon_cache: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let documents = read_corpus_dir(&cli.data)
        .with_context(|| format!("reading PMB data from {}", cli.data.display()))?;

    if let Some(dir) = &cli.translation_dir {
        let sentences: Vec<String> = documents.iter().map(|d| d.english.clone()).collect();
        write_translation_input(dir, &sentences)
            .with_context(|| format!("writing translation input to {}", dir.display()))?;
    }

    let pairs = read_translations(&cli.eng_hnd_sen)
        .with_context(|| format!("reading translations from {}", cli.eng_hnd_sen.display()))?;

    let config = match &cli.config {
        Some(path) => AlignConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AlignConfig::default(),
    };

    let paths = LexiconPaths {
        bilingual: cli.eng_hnd_dict.clone(),
        controlled: cli.controlled_dict.clone(),
        tam: cli.hnd_tam_dict.clone(),
        morph: cli.hnd_morph_dict.clone(),
    };
    let lexicons = match &cli.lexicon_cache {
        Some(cache) => load_or_build_lexicons(cache, &paths),
        None => Lexicons::load(&paths),
    }
    .context("loading dictionaries")?;

    // Verb senses in the corpus teach the chunker which words are verbs.
    let verb_lemmas = documents
        .iter()
        .flat_map(|d| d.annotations.iter())
        .filter_map(|line| parse_line(line).ok()?.sense_key())
        .filter(|sense| sense.is_verb())
        .map(|sense| sense.root);
    let chunker = RuleChunker::new().with_verb_lemmas(verb_lemmas);

    let engine = AlignEngine::new(lexicons, config).with_chunker(chunker);
    let annotations: Vec<_> = documents.into_iter().map(|d| d.annotations).collect();
    let alignment = engine
        .align_corpus(&annotations, &pairs)
        .context("aligning corpus")?;

    write_alignment(&cli.output, cli.format, &alignment)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    print_summary(&alignment, &cli.output);
    Ok(())
}

fn print_summary(alignment: &CorpusAlignment, output: &std::path::Path) {
    let records: usize = alignment.sentences.iter().map(|s| s.records.len()).sum();
    let resolved: usize = alignment
        .sentences
        .iter()
        .flat_map(|s| &s.records)
        .filter(|r| !r.hindi_equivalent.is_empty())
        .count();

    println!("{}", "PMB Hindi alignment".bold());
    println!("---------------------------------------------------------------");
    println!(
        "  sentences aligned : {}",
        alignment.sentences.len().to_string().green()
    );
    let skipped = alignment.skipped.len().to_string();
    if alignment.skipped.is_empty() {
        println!("  sentences skipped : {}", skipped.green());
    } else {
        println!("  sentences skipped : {}", skipped.red());
        for s in &alignment.skipped {
            println!("    #{} {}", s.index, s.reason.as_str().dark_grey());
        }
    }
    println!("  Hindi equivalents : {resolved}/{records}");
    println!("  output            : {}", output.display().to_string().cyan());
}
