use crate::utils::error::{LeaderboardError, Result};
use std::net::SocketAddr;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_origin(field_name: &str, origin: &str) -> Result<()> {
    if origin.is_empty() {
        return Err(LeaderboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: origin.to_string(),
            reason: "Origin cannot be empty".to_string(),
        });
    }

    let url = Url::parse(origin).map_err(|e| LeaderboardError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: origin.to_string(),
        reason: format!("Invalid origin format: {}", e),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(LeaderboardError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: origin.to_string(),
                reason: format!("Unsupported origin scheme: {}", scheme),
            })
        }
    }

    // 瀏覽器送出的 Origin 只有 scheme://host[:port]
    if url.path() != "/" || origin.ends_with('/') || url.query().is_some() {
        return Err(LeaderboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: origin.to_string(),
            reason: "Origin must not contain a path, query or trailing slash".to_string(),
        });
    }

    Ok(())
}

pub fn validate_bind_address(field_name: &str, addr: &str) -> Result<SocketAddr> {
    addr.parse::<SocketAddr>()
        .map_err(|e| LeaderboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LeaderboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LeaderboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 只檢查是否為空字串，不做 trim：名稱是精確比對的鍵
pub fn validate_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(LeaderboardError::ValidationError {
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LeaderboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
