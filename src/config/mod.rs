#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_STORE_PATH: &str = "ranking.csv";
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] =
    ["http://localhost:8080", "https://takaryo1010.github.io"];
pub const MAX_LEADERBOARD_SIZE: usize = 1000;

/// 共用的設定檢查，CLI 與 TOML 設定都走這裡
pub fn validate_settings<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validation::validate_bind_address("bind", config.bind_address())?;
    validation::validate_path("store_path", config.store_path())?;

    for origin in config.allowed_origins() {
        validation::validate_origin("allowed_origins", origin)?;
    }

    validation::validate_range(
        "leaderboard_size",
        config.leaderboard_size(),
        1,
        MAX_LEADERBOARD_SIZE,
    )?;

    Ok(())
}
