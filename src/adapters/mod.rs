// Adapters layer: concrete document surfaces behind the domain port.

pub mod pdf;
pub mod text;

pub use pdf::PdfSurface;
pub use text::TextSurface;
