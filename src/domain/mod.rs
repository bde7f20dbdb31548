// Domain layer: calendrical primitives, chart types and ports. No I/O here.

pub mod fmt;
pub mod model;
pub mod nayin;
pub mod ports;
