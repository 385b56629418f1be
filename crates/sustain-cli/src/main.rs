//! Sustain CLI - Load a sustainability report into Weaviate.

use anyhow::Context;
use clap::Parser;
use sustain_cli::{Cli, Config, Formatter};
use sustain_domain::traits::PageSource;
use sustain_ingest::{KpiDataset, PdfDocument, Pipeline};
use sustain_store::WeaviateStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Failures listed individually before the summary
const MAX_LISTED_FAILURES: usize = 10;

fn main() {
    // Initialize tracing (log to stderr)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let formatter = Formatter::new(!cli.no_color);

    if let Err(e) = run(&cli, &formatter) {
        eprintln!("{}", formatter.error(&format!("{:#}", e)));
        std::process::exit(1);
    }
}

fn run(cli: &Cli, formatter: &Formatter) -> anyhow::Result<()> {
    let config = Config::resolve(cli).context("Failed to resolve configuration")?;
    let pipeline = Pipeline::new(config.ingest.clone())?;
    info!(
        pdf = %config.pdf.display(),
        kpis = %config.kpis.display(),
        source = %pipeline.config().source_label,
        on_error = ?pipeline.config().loader.on_error,
        "Configuration resolved"
    );

    // Inputs are validated before the store is touched
    let dataset = KpiDataset::load(&config.kpis)
        .with_context(|| format!("Failed to load KPI dataset {}", config.kpis.display()))?;
    println!(
        "{}",
        formatter.info(&format!(
            "{} KPI entries, {} facts to load",
            dataset.entries().len(),
            dataset.fact_count()
        ))
    );

    let document = PdfDocument::open(&config.pdf)?;
    println!(
        "{}",
        formatter.info(&format!(
            "{} has {} pages",
            config.pdf.display(),
            document.page_count()
        ))
    );

    let weaviate = config.weaviate_config()?;
    let url = weaviate.base_url();
    let mut store = WeaviateStore::connect(weaviate)
        .with_context(|| format!("Failed to connect to Weaviate at {}", url))?;
    println!(
        "{}",
        formatter.success(&format!("Connected to {}", store.base_url()))
    );

    let summary = pipeline.run(&mut store, &dataset, &document)?;

    for line in formatter.stages(&summary) {
        println!("{}", line);
    }
    for line in formatter.failures(&summary, MAX_LISTED_FAILURES) {
        eprintln!("{}", line);
    }
    println!("{}", formatter.summary_table(&summary));

    summary.into_result()?;
    println!("{}", formatter.success("Ingestion complete"));
    Ok(())
}
