use anyhow::Context;
use aspectarian::{ReportBuilder, ReportSettings, TextCorpus};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
enum Input {
    /// Rank a pre-tagged aspect payload (JSON, JSON wrapped in text, or an array).
    Aspects { file: PathBuf },
    /// Detect aspects from a JSON array of computed positions; unusable records are skipped.
    Positions { file: PathBuf },
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    input: Input,

    /// Interpretive text corpus (JSON). Without it every text field is empty.
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Report settings (TOML).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the configured report width.
    #[arg(long)]
    limit: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => ReportSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ReportSettings::default(),
    };
    if let Some(limit) = args.limit {
        settings.limit = limit;
        settings.validate().context("invalid --limit")?;
    }

    let corpus = match &args.corpus {
        Some(path) => TextCorpus::load(path)
            .with_context(|| format!("loading text corpus from {}", path.display()))?,
        None => TextCorpus::new("none"),
    };
    let catalog = settings.catalog().context("building aspect catalog")?;
    let builder = ReportBuilder::new(&catalog, &corpus, &settings);

    let report = match &args.input {
        Input::Aspects { file } => {
            let raw = fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display()))?;
            builder.report_text(&raw)?
        }
        Input::Positions { file } => {
            let raw = fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display()))?;
            let positions: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("parsing positions in {}", file.display()))?;
            builder.report_positions(&positions)?
        }
    };

    if !report.parsed_ok {
        log::warn!("aspect payload could not be parsed; report is empty");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
