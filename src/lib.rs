pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::toml_config::TomlConfig;

pub use adapters::http::{build_router, create_router, cors_layer};
pub use adapters::storage::{CsvFileStorage, MemoryStorage};
pub use crate::core::{board::LeaderboardService, ranker::rank};
pub use domain::model::{RawRecord, Record, DEFAULT_LEADERBOARD_SIZE};
pub use utils::error::{LeaderboardError, Result};
