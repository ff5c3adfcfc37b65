use crate::domain::model::{Collection, FieldWarning, ItemField, LineItem};
use crate::utils::error::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;

const CUSTOMER_PROMPT: &str = "Nombre del cliente: ";
const CONTINUE_PROMPT: &str = "¿Desea añadir un producto a la factura? (s/n)";
const DESCRIPTION_PROMPT: &str = "Descripción del producto: ";
const QUANTITY_PROMPT: &str = "Cantidad: ";
const PRICE_PROMPT: &str = "Precio unitario: ";
const STOP_ANSWER: &str = "n";

/// How malformed numeric answers are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Use zero and record a warning.
    #[default]
    Lenient,
    /// Ask for the same field again.
    Strict,
}

/// Interactive line-item collection over any line-oriented reader/writer pair.
pub struct ItemCollector<R: BufRead, W: Write> {
    input: R,
    output: W,
    mode: ParseMode,
}

impl<R: BufRead, W: Write> ItemCollector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::with_mode(input, output, ParseMode::default())
    }

    pub fn with_mode(input: R, output: W, mode: ParseMode) -> Self {
        Self {
            input,
            output,
            mode,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Returns an empty name when the input is already exhausted.
    pub fn read_customer_name(&mut self) -> Result<String> {
        write!(self.output, "{}", CUSTOMER_PROMPT)?;
        self.output.flush()?;
        Ok(self.read_answer()?.unwrap_or_default())
    }

    pub fn collect(&mut self) -> Result<Collection> {
        let mut collection = Collection::default();

        loop {
            writeln!(self.output, "{}", CONTINUE_PROMPT)?;
            let Some(answer) = self.read_answer()? else {
                tracing::debug!("Input closed, finishing collection");
                break;
            };
            if answer == STOP_ANSWER {
                break;
            }

            let position = collection.items.len() + 1;
            match self.read_item(position, &mut collection.warnings)? {
                Some(item) => {
                    tracing::debug!(
                        "Added item {}: {} x {} @ {}",
                        position,
                        item.description,
                        item.quantity,
                        item.unit_price
                    );
                    collection.items.push(item);
                }
                None => {
                    tracing::warn!("Input closed while reading item {}, discarding it", position);
                    break;
                }
            }
        }

        tracing::info!(
            "Collected {} items ({} warnings)",
            collection.items.len(),
            collection.warnings.len()
        );
        Ok(collection)
    }

    fn read_item(
        &mut self,
        position: usize,
        warnings: &mut Vec<FieldWarning>,
    ) -> Result<Option<LineItem>> {
        let Some(description) = self.prompt(DESCRIPTION_PROMPT)? else {
            return Ok(None);
        };
        let Some(quantity) = self.read_number::<i64>(QUANTITY_PROMPT, ItemField::Quantity, position, warnings)? else {
            return Ok(None);
        };
        let Some(unit_price) = self.read_number::<f64>(PRICE_PROMPT, ItemField::UnitPrice, position, warnings)? else {
            return Ok(None);
        };

        Ok(Some(LineItem {
            description,
            quantity,
            unit_price,
        }))
    }

    fn read_number<T: FromStr + Default>(
        &mut self,
        prompt: &str,
        field: ItemField,
        position: usize,
        warnings: &mut Vec<FieldWarning>,
    ) -> Result<Option<T>> {
        loop {
            let Some(raw) = self.prompt(prompt)? else {
                return Ok(None);
            };
            if let Ok(value) = raw.parse::<T>() {
                return Ok(Some(value));
            }

            match self.mode {
                ParseMode::Strict => {
                    writeln!(self.output, "Valor no válido: '{}'. Intente de nuevo.", raw)?;
                }
                ParseMode::Lenient => {
                    let warning = FieldWarning {
                        item_position: position,
                        field,
                        raw_input: raw,
                    };
                    tracing::warn!("{}", warning);
                    writeln!(self.output, "Aviso: valor no válido '{}', se usará 0", warning.raw_input)?;
                    warnings.push(warning);
                    return Ok(Some(T::default()));
                }
            }
        }
    }

    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_answer()
    }

    /// `None` at end of input.
    fn read_answer(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
