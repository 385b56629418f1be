//! CLI argument parsing.

use clap::Parser;
use std::path::PathBuf;
use sustain_ingest::OnInsertError;

/// Sustain - Load a sustainability report into Weaviate.
///
/// Recreates the KPI and narrative collections, then inserts one fact per
/// (metric, year) and one passage per qualifying report page.
#[derive(Debug, Parser)]
#[command(name = "sustain")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "SUSTAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Sustainability report PDF
    #[arg(long, env = "SUSTAIN_PDF")]
    pub pdf: Option<PathBuf>,

    /// KPI dataset (JSON with a `kpis` list)
    #[arg(long, env = "SUSTAIN_KPIS")]
    pub kpis: Option<PathBuf>,

    /// Weaviate cluster URL
    #[arg(long, env = "WEAVIATE_URL")]
    pub weaviate_url: Option<String>,

    /// Weaviate API key
    #[arg(long, env = "WEAVIATE_API_KEY", hide_env_values = true)]
    pub weaviate_api_key: Option<String>,

    /// OpenAI key forwarded to the vectorizer module
    #[arg(long, env = "OPENAI_APIKEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// What to do when a single insert fails
    #[arg(long, value_enum)]
    pub on_error: Option<OnErrorArg>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Insert failure policy options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OnErrorArg {
    /// Record the failure and keep going (default)
    Continue,
    /// Stop at the first failure
    Abort,
}

impl From<OnErrorArg> for OnInsertError {
    fn from(arg: OnErrorArg) -> Self {
        match arg {
            OnErrorArg::Continue => OnInsertError::Continue,
            OnErrorArg::Abort => OnInsertError::Abort,
        }
    }
}
