use crate::core::collector::ParseMode;
use crate::core::renderer::{RenderSettings, DEFAULT_FONT_SIZE, DEFAULT_TITLE};
use crate::domain::model::DEFAULT_INVOICE_NUMBER;
use crate::domain::ports::FontFamily;
use crate::utils::error::{InvoiceError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_PATH: &str = "factura.pdf";
const MIN_FONT_SIZE: f32 = 6.0;
const MAX_FONT_SIZE: f32 = 72.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    pub invoice: InvoiceSection,
    pub output: OutputSection,
    pub collection: CollectionSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceSection {
    pub number: String,
    pub title: String,
}

impl Default for InvoiceSection {
    fn default() -> Self {
        Self {
            number: DEFAULT_INVOICE_NUMBER.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub path: String,
    pub font: FontFamily,
    pub font_size: f32,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            font: FontFamily::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionSection {
    /// Re-prompt on malformed numbers instead of defaulting to zero.
    pub strict: bool,
}

impl InvoiceConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| InvoiceError::ConfigError {
            message: format!("cannot read '{}': {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InvoiceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${INVOICE_NUMBER})；未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InvoiceError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_non_empty_string("invoice.number", &self.invoice.number)?;
        validation::validate_range(
            "output.font_size",
            self.output.font_size,
            MIN_FONT_SIZE,
            MAX_FONT_SIZE,
        )?;
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output.path)
    }

    pub fn parse_mode(&self) -> ParseMode {
        if self.collection.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            title: self.invoice.title.clone(),
            font: self.output.font,
            font_size: self.output.font_size,
        }
    }
}

impl Validate for InvoiceConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
