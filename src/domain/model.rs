use serde::{Deserialize, Serialize};

/// 排行榜預設保留的名次數
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// A submission exactly as it is persisted: the score is kept as text and
/// only decoded when the leaderboard is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub name: String,
    pub score: String,
}

impl RawRecord {
    pub fn new(name: impl Into<String>, score: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: score.into(),
        }
    }
}

/// A decoded leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Score")]
    pub score: i64,
}

impl Record {
    pub fn new(name: impl Into<String>, score: i64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

impl From<&Record> for RawRecord {
    fn from(record: &Record) -> Self {
        RawRecord::new(record.name.clone(), record.score.to_string())
    }
}
