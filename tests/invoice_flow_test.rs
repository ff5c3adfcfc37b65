use chrono::{NaiveDate, NaiveDateTime};
use quick_invoice::domain::model::format_amount;
use quick_invoice::{
    Invoice, InvoiceConfig, InvoiceEngine, InvoiceError, InvoiceRenderer, LineItem, PdfSurface,
    RunReport, TextSurface,
};
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

fn issued_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(9, 5, 3)
        .unwrap()
}

fn config_for(path: &Path) -> InvoiceConfig {
    let mut config = InvoiceConfig::default();
    config.output.path = path.to_str().unwrap().to_string();
    config
}

fn run(config: &InvoiceConfig, script: &str) -> (quick_invoice::Result<RunReport>, String) {
    let mut prompts = Vec::new();
    let result = {
        let mut engine = InvoiceEngine::new(config, Cursor::new(script.as_bytes()), &mut prompts)
            .with_preview(true);
        engine.run_at(issued_at())
    };
    (result, String::from_utf8(prompts).unwrap())
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn test_single_item_invoice() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("factura.pdf");
    let config = config_for(&path);

    let (result, prompts) = run(&config, "Ana\ns\nLibro\n3\n10.50\nn\n");
    let report = result.unwrap();

    assert_eq!(report.customer, "Ana");
    assert_eq!(report.item_count, 1);
    assert_eq!(format_amount(report.grand_total), "31.50");
    assert!(report.warnings.is_empty());
    assert_eq!(report.output_path, path);

    assert!(prompts.starts_with("Nombre del cliente: "));
    assert_eq!(prompts.matches("(s/n)").count(), 2);

    let pdf = std::fs::read(&path).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(contains(&pdf, b"(Libro) Tj"));
    assert!(contains(&pdf, b"(31.50) Tj"));
    assert!(contains(&pdf, b"(Cliente: Ana ) Tj"));
    assert!(contains(&pdf, b"(Fecha: 07/03/2024 09:05:03) Tj"));
    assert!(contains(&pdf, b"(Numero de Factura: 12345) Tj"));

    let preview = report.preview.unwrap();
    assert!(preview.contains("Libro"));
    assert!(preview.contains("Total Final"));
}

#[test]
fn test_two_item_invoice() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("factura.pdf");
    let config = config_for(&path);

    let (result, _) = run(
        &config,
        "Luis\ns\nLápiz\n5\n0.75\ns\nCuaderno\n2\n3.00\nn\n",
    );
    let report = result.unwrap();
    assert_eq!(report.item_count, 2);
    assert_eq!(format_amount(report.grand_total), "9.75");

    let pdf = std::fs::read(&path).unwrap();
    assert!(contains(&pdf, b"(L\xe1piz) Tj"));
    assert!(contains(&pdf, b"(3.75) Tj"));
    assert!(contains(&pdf, b"(6.00) Tj"));
    assert!(contains(&pdf, b"(9.75) Tj"));

    let preview = report.preview.unwrap();
    let lapiz = preview.find("Lápiz").unwrap();
    let cuaderno = preview.find("Cuaderno").unwrap();
    assert!(lapiz < cuaderno);
}

#[test]
fn test_malformed_quantity_becomes_zero() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("factura.pdf");
    let config = config_for(&path);

    let (result, prompts) = run(&config, "Ana\ns\nLibro\nabc\n10.50\nn\n");
    let report = result.unwrap();

    assert_eq!(report.item_count, 1);
    assert_eq!(format_amount(report.grand_total), "0.00");
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].raw_input, "abc");
    assert!(prompts.contains("'abc'"));

    let pdf = std::fs::read(&path).unwrap();
    assert!(contains(&pdf, b"(10.50) Tj"));
    assert!(contains(&pdf, b"(0.00) Tj"));
}

#[test]
fn test_malformed_quantity_with_negative_price_totals_unsigned_zero() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("factura.pdf");
    let config = config_for(&path);

    let (result, _) = run(&config, "Ana\ns\nX\nabc\n-5\nn\n");
    let report = result.unwrap();
    assert_eq!(format_amount(report.grand_total), "0.00");

    let preview = report.preview.unwrap();
    let row = preview.lines().nth(8).unwrap();
    assert_eq!(row, format!("{:<16}{:<12}{:<16}0.00", "X", "0", "-5.00"));
    assert!(!preview.contains("-0.00"));

    let pdf = std::fs::read(&path).unwrap();
    assert!(!contains(&pdf, b"(-0.00) Tj"));
}

#[test]
fn test_no_items_totals_zero() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("factura.pdf");
    let config = config_for(&path);

    let (result, _) = run(&config, "Ana\nn\n");
    let report = result.unwrap();

    assert_eq!(report.item_count, 0);
    assert_eq!(format_amount(report.grand_total), "0.00");

    let preview = report.preview.unwrap();
    let lines: Vec<&str> = preview.lines().collect();
    assert_eq!(lines[6], format!("{:<16}{:<12}{:<16}Total", "Descripcion", "Cantidad", "Precio Unitario"));
    assert!(lines[8].starts_with("-----"));
    assert_eq!(lines[9], format!("{:<16}{:<12}{:<16}0.00", "Total Final", "", ""));
}

#[test]
fn test_rerun_overwrites_previous_output() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("factura.pdf");
    let config = config_for(&path);

    run(&config, "Ana\ns\nLibro\n3\n10.50\nn\n").0.unwrap();
    run(&config, "Luis\ns\nCuaderno\n2\n3.00\nn\n").0.unwrap();

    let pdf = std::fs::read(&path).unwrap();
    assert!(contains(&pdf, b"(Cliente: Luis ) Tj"));
    assert!(!contains(&pdf, b"(Cliente: Ana ) Tj"));
}

#[test]
fn test_unwritable_output_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing-dir").join("factura.pdf");
    let config = config_for(&path);

    let (result, _) = run(&config, "Ana\nn\n");
    assert!(matches!(result, Err(InvoiceError::IoError(_))));
    assert!(!path.exists());
}

#[test]
fn test_strict_mode_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("factura.pdf");
    let mut config = config_for(&path);
    config.collection.strict = true;

    let (result, prompts) = run(&config, "Ana\ns\nLibro\nabc\n3\n10.50\nn\n");
    let report = result.unwrap();
    assert!(report.warnings.is_empty());
    assert_eq!(format_amount(report.grand_total), "31.50");
    assert_eq!(prompts.matches("Cantidad: ").count(), 2);
}

#[test]
fn test_long_invoices_paginate() {
    let items = (1..=30)
        .map(|i| LineItem::new(format!("Producto {}", i), i, 1.0))
        .collect();
    let invoice = Invoice::new("Ana", "12345", issued_at(), items);
    let renderer = InvoiceRenderer::default();

    let mut pdf = PdfSurface::new();
    let summary = renderer.render(&invoice, &mut pdf);
    assert_eq!(summary.rows, 30);
    assert_eq!(format_amount(summary.grand_total), "465.00");
    assert_eq!(pdf.page_count(), 2);

    let mut text = TextSurface::new();
    renderer.render(&invoice, &mut text);
    assert!(text.as_text().contains("Producto 30"));
}
