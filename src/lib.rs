pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::calendar::AstronomicalCalendar;
pub use adapters::llm::LlmInterpreter;
pub use config::{AppConfig, Environment};
pub use crate::core::{BaziService, CalculateRequest, PillarEngine};
pub use utils::error::{BaziError, Result};
