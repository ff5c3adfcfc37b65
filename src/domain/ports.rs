use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Standard Type1 families every PDF reader ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    pub fn base_font(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Times => "Times-Roman",
            FontFamily::Courier => "Courier",
        }
    }
}

/// Minimal drawing contract the invoice renderer needs from a document backend.
///
/// Units are millimetres. A `cell` of width `0` extends to the right margin.
pub trait DocumentSurface {
    fn add_page(&mut self);
    fn set_font(&mut self, family: FontFamily, size_pt: f32);
    fn cell(&mut self, width: f32, height: f32, text: &str);
    fn ln(&mut self, height: f32);
    fn output_file(&mut self, path: &Path) -> Result<()>;
}
