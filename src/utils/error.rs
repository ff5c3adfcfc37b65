use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("PDF encoding error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl InvoiceError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            InvoiceError::ConfigError { .. } | InvoiceError::InvalidConfigValueError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            InvoiceError::IoError(e) => format!("No se pudo escribir la factura: {}", e),
            InvoiceError::PdfError(e) => format!("No se pudo generar el PDF: {}", e),
            InvoiceError::ConfigError { message } => format!("Configuración inválida: {}", message),
            InvoiceError::InvalidConfigValueError { field, reason, .. } => {
                format!("Valor inválido en '{}': {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            InvoiceError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            InvoiceError::PdfError(_) => {
                "Check the item descriptions for unusual characters and run again"
            }
            InvoiceError::ConfigError { .. } | InvoiceError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or the command line flags and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
