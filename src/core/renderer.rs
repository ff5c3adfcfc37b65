use crate::domain::model::{format_amount, format_timestamp, Invoice, RenderSummary};
use crate::domain::ports::{DocumentSurface, FontFamily};

const RULE: &str = "-----------------------------------------------------";
const ROW_HEIGHT: f32 = 10.0;
const FULL_WIDTH: f32 = 0.0;
const DESCRIPTION_WIDTH: f32 = 40.0;
const QUANTITY_WIDTH: f32 = 30.0;
const PRICE_WIDTH: f32 = 40.0;
const TOTAL_WIDTH: f32 = 40.0;

pub const DEFAULT_TITLE: &str = "Factura";
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub title: String,
    pub font: FontFamily,
    pub font_size: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            font: FontFamily::default(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Lays an invoice out onto a surface in a single pass.
#[derive(Debug, Clone, Default)]
pub struct InvoiceRenderer {
    settings: RenderSettings,
}

impl InvoiceRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn render<S: DocumentSurface>(&self, invoice: &Invoice, surface: &mut S) -> RenderSummary {
        surface.add_page();
        surface.set_font(self.settings.font, self.settings.font_size);

        self.render_header(invoice, surface);
        self.render_column_headers(surface);

        for item in invoice.items() {
            let total = item.total();
            surface.cell(DESCRIPTION_WIDTH, ROW_HEIGHT, &item.description);
            surface.cell(QUANTITY_WIDTH, ROW_HEIGHT, &item.quantity.to_string());
            surface.cell(PRICE_WIDTH, ROW_HEIGHT, &format_amount(item.unit_price));
            surface.cell(TOTAL_WIDTH, ROW_HEIGHT, &format_amount(total));
            surface.ln(ROW_HEIGHT);
        }

        let grand_total = invoice.grand_total();
        self.render_footer(grand_total, surface);

        tracing::debug!(
            "Rendered invoice {} with {} rows, total {}",
            invoice.number(),
            invoice.items().len(),
            format_amount(grand_total)
        );

        RenderSummary {
            rows: invoice.items().len(),
            grand_total,
        }
    }

    fn render_header<S: DocumentSurface>(&self, invoice: &Invoice, surface: &mut S) {
        let lines = [
            RULE.to_string(),
            self.settings.title.clone(),
            format!("Numero de Factura: {}", invoice.number()),
            format!("Fecha: {}", format_timestamp(invoice.issued_at())),
            format!("Cliente: {} ", invoice.customer()),
            RULE.to_string(),
        ];
        for line in &lines {
            surface.cell(FULL_WIDTH, ROW_HEIGHT, line);
            surface.ln(ROW_HEIGHT);
        }
    }

    fn render_column_headers<S: DocumentSurface>(&self, surface: &mut S) {
        surface.cell(DESCRIPTION_WIDTH, ROW_HEIGHT, "Descripcion");
        surface.cell(QUANTITY_WIDTH, ROW_HEIGHT, "Cantidad");
        surface.cell(PRICE_WIDTH, ROW_HEIGHT, "Precio Unitario");
        surface.cell(TOTAL_WIDTH, ROW_HEIGHT, "Total");
        surface.ln(ROW_HEIGHT);
        surface.cell(FULL_WIDTH, ROW_HEIGHT, RULE);
        surface.ln(ROW_HEIGHT);
    }

    fn render_footer<S: DocumentSurface>(&self, grand_total: f64, surface: &mut S) {
        surface.cell(FULL_WIDTH, ROW_HEIGHT, RULE);
        surface.ln(ROW_HEIGHT);
        surface.cell(DESCRIPTION_WIDTH, ROW_HEIGHT, "Total Final");
        surface.cell(QUANTITY_WIDTH, ROW_HEIGHT, "");
        surface.cell(PRICE_WIDTH, ROW_HEIGHT, "");
        surface.cell(TOTAL_WIDTH, ROW_HEIGHT, &format_amount(grand_total));
        surface.ln(ROW_HEIGHT);
        surface.cell(FULL_WIDTH, ROW_HEIGHT, RULE);
    }
}
