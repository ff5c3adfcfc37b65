use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const DEFAULT_INVOICE_NUMBER: &str = "12345";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: i64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    pub fn total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Rendered aggregate. Items are fixed at construction and only exposed as a slice.
#[derive(Debug, Clone)]
pub struct Invoice {
    customer: String,
    number: String,
    issued_at: NaiveDateTime,
    items: Vec<LineItem>,
}

impl Invoice {
    pub fn new(
        customer: impl Into<String>,
        number: impl Into<String>,
        issued_at: NaiveDateTime,
        items: Vec<LineItem>,
    ) -> Self {
        Self {
            customer: customer.into(),
            number: number.into(),
            issued_at,
            items,
        }
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn issued_at(&self) -> NaiveDateTime {
        self.issued_at
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Summed in insertion order.
    pub fn grand_total(&self) -> f64 {
        self.items.iter().fold(0.0, |acc, item| acc + item.total())
    }
}

/// Which of the numeric item fields an input belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Quantity,
    UnitPrice,
}

impl std::fmt::Display for ItemField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemField::Quantity => write!(f, "quantity"),
            ItemField::UnitPrice => write!(f, "unit price"),
        }
    }
}

/// A malformed numeric entry that was replaced by zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    /// 1-based position of the item in the invoice.
    pub item_position: usize,
    pub field: ItemField,
    pub raw_input: String,
}

impl std::fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "item {}: {} '{}' is not a number, using 0",
            self.item_position, self.field, self.raw_input
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub items: Vec<LineItem>,
    pub warnings: Vec<FieldWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSummary {
    pub rows: usize,
    pub grand_total: f64,
}

/// Two decimals; values that round to zero never print a sign.
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    if formatted == "-0.00" {
        "0.00".to_string()
    } else {
        formatted
    }
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format("%d/%m/%Y %H:%M:%S").to_string()
}
