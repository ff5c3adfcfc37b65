// Domain layer: invoice data model and the document surface port.

pub mod model;
pub mod ports;
