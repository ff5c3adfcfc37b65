pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{PdfSurface, TextSurface};
pub use config::InvoiceConfig;
pub use self::core::{
    collector::{ItemCollector, ParseMode},
    engine::{InvoiceEngine, RunReport},
    renderer::{InvoiceRenderer, RenderSettings},
};
pub use domain::model::{FieldWarning, Invoice, LineItem};
pub use utils::error::{InvoiceError, Result};
