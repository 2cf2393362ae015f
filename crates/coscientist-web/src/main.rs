//! Co-Scientist headless client
//!
//! Fills the search form, runs one analysis cycle, and prints the rendered page.
//! Run with: cargo run -p coscientist-web -- --query insulin --organism human

use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use coscientist_common::ClientConfig;
use coscientist_web::page::{render_html, render_text, skeleton};
use coscientist_web::state::{Page, Phase};
use coscientist_web::submit::Orchestrator;
use coscientist_web::transport::HttpTransport;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Html,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "coscientist", version, about = "Query the Co-Scientist analysis service")]
struct Args {
    /// Free-text query (protein, gene, or keyword)
    #[arg(short, long, default_value = "")]
    query: String,

    /// Organism filter, e.g. "Homo sapiens"
    #[arg(short, long, default_value = "")]
    organism: String,

    /// Research focus, e.g. "mechanism of action"
    #[arg(short, long, default_value = "")]
    focus: String,

    /// Path to coscientist.toml (defaults to $COSCIENTIST_CONFIG, then ./coscientist.toml)
    #[arg(long)]
    config: Option<String>,

    /// Override endpoint.base_url
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Only probe the health endpoint
    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };
    if let Some(base_url) = args.base_url {
        config.endpoint.base_url = base_url;
    }

    let transport = HttpTransport::new(&config.endpoint)?;
    info!(url = %transport.analyze_url(), policy = config.submission.overlap_policy.as_str(), "Client ready");

    if args.health {
        let status = transport.health().await?;
        println!("{}", status);
        return Ok(ExitCode::SUCCESS);
    }

    let ids = config.elements.clone();
    let mut doc = skeleton(&ids);
    doc.set_value(&ids.query, &args.query)?;
    doc.set_value(&ids.organism, &args.organism)?;
    doc.set_value(&ids.focus, &args.focus)?;

    let page = Mutex::new(Page::new(doc, ids.clone()));
    let orchestrator = Orchestrator::new(transport, config.submission.overlap_policy);
    let report = orchestrator.submit(&page).await;
    info!(id = %report.id, outcome = ?report.outcome, "Submission finished");

    let page = page.into_inner().unwrap_or_else(|e| e.into_inner());
    let doc = page.into_document();
    match args.format {
        OutputFormat::Html => print!("{}", render_html(&doc, &ids)),
        OutputFormat::Text => print!("{}", render_text(&doc, &ids)),
    }

    Ok(match report.phase() {
        Some(Phase::Success) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
