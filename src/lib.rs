pub mod analysis;
pub mod api;
pub mod cache;
pub mod collect;
pub mod config;
pub mod display;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod rate_limit;

#[cfg(test)]
pub(crate) mod testing;

pub use analysis::{ChampionStats, CounterRecord, StrengthClass};
pub use config::Config;
pub use error::AppError;
pub use pipeline::{run, RunReport, RunSettings};
