use crate::adapters::{PdfSurface, TextSurface};
use crate::config::InvoiceConfig;
use crate::core::collector::ItemCollector;
use crate::core::renderer::InvoiceRenderer;
use crate::domain::model::{format_amount, FieldWarning, Invoice};
use crate::domain::ports::DocumentSurface;
use crate::utils::error::Result;
use chrono::{Local, NaiveDateTime};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub customer: String,
    pub item_count: usize,
    pub grand_total: f64,
    pub warnings: Vec<FieldWarning>,
    pub preview: Option<String>,
}

/// Collect, then render, then write: one invoice per run.
pub struct InvoiceEngine<R: BufRead, W: Write> {
    collector: ItemCollector<R, W>,
    renderer: InvoiceRenderer,
    invoice_number: String,
    output_path: PathBuf,
    preview: bool,
}

impl<R: BufRead, W: Write> InvoiceEngine<R, W> {
    pub fn new(config: &InvoiceConfig, input: R, output: W) -> Self {
        Self {
            collector: ItemCollector::with_mode(input, output, config.parse_mode()),
            renderer: InvoiceRenderer::new(config.render_settings()),
            invoice_number: config.invoice.number.clone(),
            output_path: config.output_path(),
            preview: false,
        }
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    pub fn run(&mut self) -> Result<RunReport> {
        self.run_with_clock(|| Local::now().naive_local())
    }

    /// Deterministic variant of [`run`](Self::run) with a fixed issue timestamp.
    pub fn run_at(&mut self, issued_at: NaiveDateTime) -> Result<RunReport> {
        self.run_with_clock(|| issued_at)
    }

    fn run_with_clock<F: FnOnce() -> NaiveDateTime>(&mut self, clock: F) -> Result<RunReport> {
        tracing::info!("Starting invoice {}", self.invoice_number);

        let customer = self.collector.read_customer_name()?;
        let collection = self.collector.collect()?;

        // timestamp is taken at render time, after the operator is done
        let invoice = Invoice::new(customer, self.invoice_number.clone(), clock(), collection.items);

        let mut surface = PdfSurface::new();
        let summary = self.renderer.render(&invoice, &mut surface);
        surface.output_file(&self.output_path)?;

        tracing::info!(
            "Invoice written to {} ({} items, total {})",
            self.output_path.display(),
            summary.rows,
            format_amount(summary.grand_total)
        );

        let preview = if self.preview {
            let mut text = TextSurface::new();
            self.renderer.render(&invoice, &mut text);
            Some(text.as_text())
        } else {
            None
        };

        Ok(RunReport {
            output_path: self.output_path.clone(),
            customer: invoice.customer().to_string(),
            item_count: summary.rows,
            grand_total: summary.grand_total,
            warnings: collection.warnings,
            preview,
        })
    }
}
