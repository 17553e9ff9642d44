use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use doc_summarizer::{
    config::{self, HighlightMode},
    logging,
    processing::{Collaborators, PipelineSettings, ProcessingService},
    upload::DocumentKind,
};

#[derive(Parser)]
#[command(
    name = "summarize-file",
    about = "Extract, summarize, and highlight a local PDF or image"
)]
struct Cli {
    /// Document to process (.pdf, .png, .jpg, .jpeg).
    path: PathBuf,
    /// Summary length tier; omit to print the extracted text only.
    #[arg(long)]
    length: Option<String>,
    /// Override the configured number of keywords.
    #[arg(long)]
    top_n: Option<usize>,
    /// Override the configured highlighting strategy.
    #[arg(long, value_enum)]
    highlight: Option<HighlightArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum HighlightArg {
    SinglePass,
    Sequential,
}

impl From<HighlightArg> for HighlightMode {
    fn from(value: HighlightArg) -> Self {
        match value {
            HighlightArg::SinglePass => Self::SinglePass,
            HighlightArg::Sequential => Self::Sequential,
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_cli_tracing();
    config::init_config();
    let config = config::get_config();

    let filename = cli
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .context("path has no file name")?;
    let kind = if DocumentKind::Pdf.accepts(filename) {
        DocumentKind::Pdf
    } else if DocumentKind::Image.accepts(filename) {
        DocumentKind::Image
    } else {
        bail!("unsupported file type: {filename} (expected pdf, png, jpg, or jpeg)");
    };

    let mut settings = PipelineSettings::from(config);
    if let Some(top_n) = cli.top_n {
        settings.keyword_top_n = top_n;
    }
    if let Some(mode) = cli.highlight {
        settings.highlight_mode = mode.into();
    }

    let collaborators = Collaborators::from_config(config)?;
    let service = ProcessingService::new(collaborators, settings);

    let text = service
        .extract(kind, &cli.path)
        .await
        .with_context(|| format!("failed to extract text from {}", cli.path.display()))?;
    let analysis = service.analyze(text, cli.length.as_deref()).await?;

    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}
