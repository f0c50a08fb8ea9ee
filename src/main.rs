use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use spellr::report::{format_term, Annotation};
use spellr::{Tokenizer, TokenizerConfig};
use std::collections::BTreeSet;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// path:line:column: term
    Text,
    /// One JSON annotation per line
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "spellr-tokenize")]
#[command(about = "List candidate spelling terms with their exact source locations")]
#[command(version)]
struct Args {
    /// Files to tokenize
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Print the sorted, deduplicated normalized word list instead of locations
    #[arg(short = 'w', long)]
    wordlist: bool,

    /// Output format for term locations
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON tokenizer config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report URIs as terms
    #[arg(long)]
    no_skip_uri: bool,

    /// Report key-like runs (hashes, identifiers) as terms
    #[arg(long)]
    no_skip_key: bool,

    /// Minimum length of a reported word
    #[arg(long)]
    min_term_length: Option<usize>,

    /// Abort on first unreadable file
    #[arg(long)]
    fail_fast: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn tokenizer_config(&self) -> Result<TokenizerConfig> {
        let mut config = match &self.config {
            Some(path) => TokenizerConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => TokenizerConfig::default(),
        };

        if self.no_skip_uri {
            config.skip_uri = false;
        }
        if self.no_skip_key {
            config.skip_key = false;
        }
        if let Some(min) = self.min_term_length {
            config.min_term_length = min;
        }
        Ok(config)
    }
}

fn report_file(
    path: &Path,
    config: &TokenizerConfig,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<u64> {
    let mut count = 0u64;
    for term in Tokenizer::open(path, config)?.into_terms() {
        let term = term?;
        match format {
            OutputFormat::Text => writeln!(out, "{}", format_term(&term))?,
            OutputFormat::Json => {
                let annotation = Annotation::from_term(&term, term.text.clone());
                writeln!(out, "{}", serde_json::to_string(&annotation)?)?;
            }
        }
        count += 1;
    }
    Ok(count)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // WHY: stdout carries the term listing, so structured logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .json()
        .init();

    info!(?args, "Parsed CLI arguments");
    let config = args.tokenizer_config()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut words = BTreeSet::new();
    let mut total_terms = 0u64;
    let mut failed = 0usize;

    for path in &args.paths {
        let result = if args.wordlist {
            Tokenizer::open(path, &config)
                .and_then(|tokenizer| tokenizer.normalized_terms())
                .map(|normalized| {
                    let count = normalized.len() as u64;
                    words.extend(normalized);
                    count
                })
                .map_err(anyhow::Error::from)
        } else {
            report_file(path, &config, args.format, &mut out)
        };

        match result {
            Ok(count) => total_terms += count,
            Err(e) if args.fail_fast => {
                return Err(e.context(format!("Failed to tokenize {}", path.display())));
            }
            Err(e) => {
                warn!("Failed to tokenize {}: {:#}", path.display(), e);
                failed += 1;
            }
        }
    }

    for word in &words {
        writeln!(out, "{word}")?;
    }
    out.flush()?;

    info!(
        "Tokenized {} files: {} terms, {} failed",
        args.paths.len() - failed,
        total_terms,
        failed
    );

    if failed > 0 {
        anyhow::bail!("{failed} file(s) could not be tokenized");
    }
    Ok(())
}
