pub mod pillars;
pub mod service;
pub mod time_block;

pub use pillars::{hour_stem, PillarEngine};
pub use service::{BaziService, CalculateRequest, ChartReport};
pub use time_block::TimeBlock;
