// Adapters layer: concrete implementations of the domain ports plus the HTTP surface.

pub mod calendar;
pub mod http;
pub mod llm;
