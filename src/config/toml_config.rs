use crate::config::{
    validate_settings, DEFAULT_ALLOWED_ORIGINS, DEFAULT_BIND_ADDRESS, DEFAULT_STORE_PATH,
};
use crate::core::ConfigProvider;
use crate::domain::model::DEFAULT_LEADERBOARD_SIZE;
use crate::utils::error::{LeaderboardError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerSection,
    pub store: StoreSection,
    pub leaderboard: LeaderboardSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: String,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDRESS.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub path: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardSection {
    pub size: usize,
    pub strict_scores: bool,
}

impl Default for LeaderboardSection {
    fn default() -> Self {
        Self {
            size: DEFAULT_LEADERBOARD_SIZE,
            strict_scores: false,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LeaderboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LeaderboardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LeaderboardError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_address(&self) -> &str {
        &self.server.bind
    }

    fn store_path(&self) -> &str {
        &self.store.path
    }

    fn allowed_origins(&self) -> &[String] {
        &self.server.allowed_origins
    }

    fn leaderboard_size(&self) -> usize {
        self.leaderboard.size
    }

    fn strict_scores(&self) -> bool {
        self.leaderboard.strict_scores
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}
