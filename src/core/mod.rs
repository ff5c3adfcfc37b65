pub mod collector;
pub mod engine;
pub mod renderer;

pub use crate::domain::model::{Collection, Invoice, LineItem};
pub use crate::domain::ports::DocumentSurface;
pub use crate::utils::error::Result;
