use crate::domain::ports::{DocumentSurface, FontFamily};
use crate::utils::error::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::path::Path;

const PT_PER_MM: f32 = 72.0 / 25.4;
const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;
const CELL_PADDING_MM: f32 = 1.0;
/// Baseline offset below the vertical centre of a cell, as a fraction of the font size.
const BASELINE_RATIO: f32 = 0.3;

/// A4 portrait PDF built in memory with `lopdf` using the standard Type1 fonts.
///
/// Coordinates are tracked top-down in millimetres and converted to PDF points
/// when a text operation is emitted. Cells that would cross the bottom margin
/// start a new page first.
#[derive(Debug, Clone)]
pub struct PdfSurface {
    pages: Vec<Vec<Operation>>,
    fonts: Vec<FontFamily>,
    font: FontFamily,
    font_size: f32,
    x: f32,
    y: f32,
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSurface {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            fonts: Vec::new(),
            font: FontFamily::default(),
            font_size: 12.0,
            x: MARGIN_MM,
            y: MARGIN_MM,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Assembles the catalog, page tree, fonts and content streams.
    pub fn build_document(&self) -> Result<Document> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let mut font_dict = Dictionary::new();
        for (index, family) in self.fonts.iter().enumerate() {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => family.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            font_dict.set(font_resource_name(index), Object::Reference(font_id));
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => Object::Dictionary(font_dict),
        });

        let empty_page = [Vec::new()];
        let pages: &[Vec<Operation>] = if self.pages.is_empty() {
            &empty_page
        } else {
            &self.pages
        };

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for operations in pages {
            let content = Content {
                operations: operations.clone(),
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_tree = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(A4_WIDTH_MM * PT_PER_MM),
                Object::Real(A4_HEIGHT_MM * PT_PER_MM),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(page_tree));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut doc = self.build_document()?;
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }

    fn font_index(&mut self, family: FontFamily) -> usize {
        match self.fonts.iter().position(|f| *f == family) {
            Some(index) => index,
            None => {
                self.fonts.push(family);
                self.fonts.len() - 1
            }
        }
    }

    fn current_page(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.add_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl DocumentSurface for PdfSurface {
    fn add_page(&mut self) {
        self.pages.push(Vec::new());
        self.x = MARGIN_MM;
        self.y = MARGIN_MM;
    }

    fn set_font(&mut self, family: FontFamily, size_pt: f32) {
        self.font_index(family);
        self.font = family;
        self.font_size = size_pt;
    }

    fn cell(&mut self, width: f32, height: f32, text: &str) {
        if self.pages.is_empty() || self.y + height > A4_HEIGHT_MM - BOTTOM_MARGIN_MM {
            let x = self.x;
            self.add_page();
            self.x = x;
        }

        let width = if width == 0.0 {
            A4_WIDTH_MM - MARGIN_MM - self.x
        } else {
            width
        };

        if !text.is_empty() {
            let font_name = font_resource_name(self.font_index(self.font));
            let font_size = self.font_size;
            let baseline = self.y + 0.5 * height + BASELINE_RATIO * (font_size / PT_PER_MM);
            let x_pt = (self.x + CELL_PADDING_MM) * PT_PER_MM;
            let y_pt = (A4_HEIGHT_MM - baseline) * PT_PER_MM;
            let encoded = encode_win_ansi(text);

            self.current_page().extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(font_name.into_bytes()), Object::Real(font_size)]),
                Operation::new("Td", vec![Object::Real(x_pt), Object::Real(y_pt)]),
                Operation::new("Tj", vec![Object::String(encoded, StringFormat::Literal)]),
                Operation::new("ET", vec![]),
            ]);
        }

        self.x += width;
    }

    fn ln(&mut self, height: f32) {
        self.x = MARGIN_MM;
        self.y += height;
    }

    fn output_file(&mut self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, &bytes)?;
        tracing::debug!(
            "Wrote {} bytes ({} pages) to {}",
            bytes.len(),
            self.page_count(),
            path.display()
        );
        Ok(())
    }
}

fn font_resource_name(index: usize) -> String {
    format!("F{}", index + 1)
}

/// Maps text onto the single-byte WinAnsi (CP1252) code page used by the standard fonts.
/// Characters outside the code page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_text(doc: &Document, page: u32) -> Vec<u8> {
        let pages = doc.get_pages();
        doc.get_page_content(*pages.get(&page).unwrap()).unwrap()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Lápiz"), b"L\xe1piz".to_vec());
        assert_eq!(encode_win_ansi("10 €"), b"10 \x80".to_vec());
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
        assert_eq!(encode_win_ansi("…•™"), b"\x85\x95\x99".to_vec());
        assert_eq!(encode_win_ansi("Šœ"), b"\x8a\x9c".to_vec());
    }

    #[test]
    fn test_text_lands_on_page() {
        let mut surface = PdfSurface::new();
        surface.add_page();
        surface.set_font(FontFamily::Helvetica, 14.0);
        surface.cell(40.0, 10.0, "Libro");
        surface.cell(40.0, 10.0, "");
        surface.ln(10.0);

        let doc = surface.build_document().unwrap();
        assert_eq!(doc.get_pages().len(), 1);
        let content = page_text(&doc, 1);
        assert!(contains(&content, b"(Libro) Tj"));
        assert!(contains(&content, b"/F1 "));
        assert!(contains(&content, b" Tf"));
    }

    #[test]
    fn test_empty_surface_still_has_a_page() {
        let doc = PdfSurface::new().build_document().unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_cells_past_bottom_margin_start_new_page() {
        let mut surface = PdfSurface::new();
        surface.add_page();
        surface.set_font(FontFamily::Courier, 12.0);
        for i in 0..40 {
            surface.cell(0.0, 10.0, &format!("row {}", i));
            surface.ln(10.0);
        }
        // 26 rows of 10 mm fit between the top margin and the bottom margin
        assert_eq!(surface.page_count(), 2);

        let doc = surface.build_document().unwrap();
        assert_eq!(doc.get_pages().len(), 2);
        assert!(!contains(&page_text(&doc, 1), b"(row 26) Tj"));
        assert!(contains(&page_text(&doc, 2), b"(row 26) Tj"));
    }

    #[test]
    fn test_serialised_output_is_pdf() {
        let mut surface = PdfSurface::new();
        surface.add_page();
        surface.set_font(FontFamily::Times, 11.0);
        surface.cell(0.0, 10.0, "Factura");
        let bytes = surface.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(contains(&bytes, b"/Times-Roman"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
    }

    #[test]
    fn test_output_file_overwrites() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("factura.pdf");
        std::fs::write(&path, b"stale").unwrap();

        let mut surface = PdfSurface::new();
        surface.add_page();
        surface.cell(0.0, 10.0, "Factura");
        surface.output_file(&path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF-"));
    }
}
