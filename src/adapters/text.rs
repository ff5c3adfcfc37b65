use crate::domain::ports::{DocumentSurface, FontFamily};
use crate::utils::error::Result;
use std::path::Path;

const MM_PER_COLUMN: f32 = 2.5;
const PAGE_BREAK: char = '\u{0C}';

/// Plain-text rendering of the same layout, one terminal column per 2.5 mm.
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    buffer: String,
    line: String,
    pages: usize,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_text(&self) -> String {
        let mut text = self.buffer.clone();
        text.push_str(self.line.trim_end());
        text
    }
}

impl DocumentSurface for TextSurface {
    fn add_page(&mut self) {
        if self.pages > 0 {
            self.ln(0.0);
            self.buffer.push(PAGE_BREAK);
            self.buffer.push('\n');
        }
        self.pages += 1;
    }

    fn set_font(&mut self, _family: FontFamily, _size_pt: f32) {}

    fn cell(&mut self, width: f32, _height: f32, text: &str) {
        if width == 0.0 {
            self.line.push_str(text);
            return;
        }
        let columns = (width / MM_PER_COLUMN).round() as usize;
        self.line.push_str(&format!("{:<width$}", text, width = columns));
    }

    fn ln(&mut self, _height: f32) {
        self.buffer.push_str(self.line.trim_end());
        self.buffer.push('\n');
        self.line.clear();
    }

    fn output_file(&mut self, path: &Path) -> Result<()> {
        std::fs::write(path, self.as_text())?;
        Ok(())
    }
}
