use crate::config::{
    validate_settings, DEFAULT_ALLOWED_ORIGINS, DEFAULT_BIND_ADDRESS, DEFAULT_STORE_PATH,
};
use crate::core::ConfigProvider;
use crate::domain::model::DEFAULT_LEADERBOARD_SIZE;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "small-leaderboard")]
#[command(about = "A small leaderboard service backed by a CSV file")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    pub store_path: String,

    #[arg(long, value_delimiter = ',', default_values = DEFAULT_ALLOWED_ORIGINS)]
    pub allowed_origins: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_LEADERBOARD_SIZE)]
    pub leaderboard_size: usize,

    #[arg(long, help = "Reject non-integer scores on submit instead of storing them")]
    pub strict_scores: bool,

    #[arg(long, help = "Load server settings from a TOML file instead of flags")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn store_path(&self) -> &str {
        &self.store_path
    }

    fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    fn leaderboard_size(&self) -> usize {
        self.leaderboard_size
    }

    fn strict_scores(&self) -> bool {
        self.strict_scores
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["small-leaderboard"]);

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.store_path(), "ranking.csv");
        assert_eq!(
            config.allowed_origins(),
            &[
                "http://localhost:8080".to_string(),
                "https://takaryo1010.github.io".to_string()
            ]
        );
        assert_eq!(config.leaderboard_size(), 10);
        assert!(!config.strict_scores());
        assert!(config.config.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_origins_are_comma_separated() {
        let config = CliConfig::parse_from([
            "small-leaderboard",
            "--allowed-origins",
            "http://a.example,https://b.example",
            "--leaderboard-size",
            "3",
            "--strict-scores",
        ]);

        assert_eq!(config.allowed_origins().len(), 2);
        assert_eq!(config.leaderboard_size(), 3);
        assert!(config.strict_scores());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = CliConfig::parse_from(["small-leaderboard", "--bind", "nowhere"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["small-leaderboard", "--leaderboard-size", "0"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["small-leaderboard", "--allowed-origins", "*"]);
        assert!(config.validate().is_err());
    }
}
