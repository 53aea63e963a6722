use crate::core::{RawRecord, Storage};
use crate::utils::error::{LeaderboardError, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Headerless two-column CSV file (`name,score` per row).
#[derive(Debug, Clone)]
pub struct CsvFileStorage {
    path: PathBuf,
}

impl CsvFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn writer_builder() -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'));
        builder
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn append_row(path: &Path, record: &RawRecord) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        let mut writer = Self::writer_builder().from_writer(file);
        writer.write_record([record.name.as_str(), record.score.as_str()])?;
        writer.flush()?;
        Ok(())
    }

    fn read_rows(path: &Path) -> Result<Vec<RawRecord>> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            if row.len() != 2 {
                return Err(LeaderboardError::MalformedRowError {
                    line: row.position().map(|p| p.line()).unwrap_or_default(),
                    fields: row.len(),
                });
            }
            records.push(RawRecord::new(&row[0], &row[1]));
        }
        Ok(records)
    }

    fn write_rows(path: &Path, records: &[RawRecord]) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = Self::writer_builder().from_writer(file);
        for record in records {
            writer.write_record([record.name.as_str(), record.score.as_str()])?;
        }
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    }

    fn replace_rows(path: &Path, records: &[RawRecord]) -> Result<()> {
        // 先寫暫存檔再 rename，避免寫到一半留下被截斷的檔案
        let temp = Self::temp_path(path);
        if let Err(e) = Self::write_rows(&temp, records) {
            let _ = fs::remove_file(&temp);
            return Err(e);
        }
        if let Err(e) = fs::rename(&temp, path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// 檔案 I/O 丟到 blocking 執行緒池，不佔用 runtime worker
async fn run_blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(std::io::Error::other)?
}

#[async_trait]
impl Storage for CsvFileStorage {
    async fn append(&self, record: &RawRecord) -> Result<()> {
        let path = self.path.clone();
        let record = record.clone();
        run_blocking(move || Self::append_row(&path, &record)).await
    }

    async fn read_all(&self) -> Result<Vec<RawRecord>> {
        let path = self.path.clone();
        let records = run_blocking(move || Self::read_rows(&path)).await?;

        tracing::debug!("Read {} rows from {}", records.len(), self.path.display());
        Ok(records)
    }

    async fn replace_all(&self, records: &[RawRecord]) -> Result<()> {
        let path = self.path.clone();
        let rows = records.to_vec();
        run_blocking(move || Self::replace_rows(&path, &rows)).await?;

        tracing::debug!("Rewrote {} with {} rows", self.path.display(), records.len());
        Ok(())
    }
}

/// In-process store. `None` means the store has never been written, which
/// reads the same way as a missing file.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    rows: Mutex<Option<Vec<RawRecord>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<RawRecord>) -> Self {
        Self {
            rows: Mutex::new(Some(records)),
        }
    }

    pub async fn snapshot(&self) -> Option<Vec<RawRecord>> {
        self.rows.lock().await.clone()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn append(&self, record: &RawRecord) -> Result<()> {
        self.rows
            .lock()
            .await
            .get_or_insert_with(Vec::new)
            .push(record.clone());
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<RawRecord>> {
        self.rows.lock().await.clone().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "leaderboard store not found").into()
        })
    }

    async fn replace_all(&self, records: &[RawRecord]) -> Result<()> {
        *self.rows.lock().await = Some(records.to_vec());
        Ok(())
    }
}
