use crate::outcome::{OutcomeRecord, SessionKind};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use colloquy_core::{ColloquyError, ColloquyResult};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Where finished sessions are written.
#[async_trait]
pub trait OutcomeStore: Send + Sync {
    /// Persist a record. Returns where it was written.
    async fn save(&self, record: &OutcomeRecord) -> ColloquyResult<PathBuf>;
    /// All stored records, oldest first.
    async fn list(&self) -> ColloquyResult<Vec<PathBuf>>;
    /// Read a record back.
    async fn load(&self, path: &Path) -> ColloquyResult<OutcomeRecord>;
}

/// `<YYYYmmdd-HHMMSS>_<session-id>_<kind>[_incomplete].json`, with the
/// timestamp in `at`'s own time zone.
pub fn outcome_filename<Tz: TimeZone>(
    at: &DateTime<Tz>,
    session_id: Uuid,
    kind: SessionKind,
    completed: bool,
) -> String
where
    Tz::Offset: fmt::Display,
{
    let suffix = if completed { "" } else { "_incomplete" };
    format!(
        "{}_{}_{}{}.json",
        at.format("%Y%m%d-%H%M%S"),
        session_id.simple(),
        kind,
        suffix
    )
}

/// One pretty-printed JSON file per session in a data directory.
pub struct FileOutcomeStore {
    base_dir: PathBuf,
}

impl FileOutcomeStore {
    /// The directory is created on first save.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory records are written to.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[async_trait]
impl OutcomeStore for FileOutcomeStore {
    async fn save(&self, record: &OutcomeRecord) -> ColloquyResult<PathBuf> {
        tokio::fs::create_dir_all(&self.base_dir).await?;

        let filename = outcome_filename(
            &Local::now(),
            record.session_id,
            record.session_kind,
            record.completed,
        );
        let path = self.base_dir.join(filename);

        let json = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&path, json).await?;

        info!(
            session_id = %record.session_id,
            path = %path.display(),
            completed = record.completed,
            "Data successfully saved"
        );
        Ok(path)
    }

    async fn list(&self) -> ColloquyResult<Vec<PathBuf>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.base_dir).await?;
        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    async fn load(&self, path: &Path) -> ColloquyResult<OutcomeRecord> {
        let data = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&data).map_err(|e| {
            ColloquyError::Session(format!("Failed to parse {}: {e}", path.display()))
        })
    }
}
