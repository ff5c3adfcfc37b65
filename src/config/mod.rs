pub mod toml_config;

pub use toml_config::InvoiceConfig;

#[cfg(feature = "cli")]
use crate::utils::{error::Result, validation::Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "quick-invoice")]
#[command(about = "Collect invoice line items interactively and render them to a PDF")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file, overrides `output.path`
    #[arg(short, long)]
    pub output: Option<String>,

    /// Invoice number printed in the header
    #[arg(long)]
    pub invoice_number: Option<String>,

    /// Document title printed in the header
    #[arg(long)]
    pub title: Option<String>,

    /// Ask again for malformed quantities and prices instead of using zero
    #[arg(long)]
    pub strict: bool,

    /// Also print a plain-text rendering of the invoice to stdout
    #[arg(long)]
    pub preview: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON on stderr")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the file configuration (or defaults), applies flag overrides and validates.
    pub fn resolve(&self) -> Result<InvoiceConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                InvoiceConfig::from_file(path)?
            }
            None => InvoiceConfig::default(),
        };

        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(number) = &self.invoice_number {
            config.invoice.number = number.clone();
        }
        if let Some(title) = &self.title {
            config.invoice.title = title.clone();
        }
        if self.strict {
            config.collection.strict = true;
        }

        config.validate()?;
        tracing::debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}
