pub mod board;
pub mod ranker;

pub use crate::domain::model::{RawRecord, Record};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
