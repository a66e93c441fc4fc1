//! Evaluation log
//!
//! Human ratings of translations are appended to a JSON array on disk.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Accepted rating range
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// One rated translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationEntry {
    pub input: String,
    pub detected_language: String,
    pub translated: String,
    pub suggested: String,
    pub rating: u8,
    #[serde(default)]
    pub comments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// File-backed evaluation log
#[derive(Debug, Clone)]
pub struct EvaluationStore {
    path: PathBuf,
}

impl EvaluationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `entry` to the log
    ///
    /// An unreadable or corrupt log is replaced by a fresh one holding only
    /// the new entry. Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns error for ratings outside 1..=5 or when the file cannot be written
    pub fn save(&self, mut entry: EvaluationEntry) -> Result<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&entry.rating) {
            bail!(
                "Rating must be between {} and {}, got {}",
                MIN_RATING,
                MAX_RATING,
                entry.rating
            );
        }
        if entry.recorded_at.is_none() {
            entry.recorded_at = Some(Utc::now());
        }

        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Discarding unreadable evaluation log {}: {:#}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        };
        entries.push(entry);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory {}", parent.display())
                })?;
            }
        }

        let body =
            serde_json::to_string_pretty(&entries).context("Failed to serialize evaluations")?;
        fs::write(&self.path, body)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        info!(
            "Saved evaluation #{} to {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }

    /// All saved evaluations, oldest first
    ///
    /// # Errors
    ///
    /// Returns error when the log exists but cannot be read or parsed
    pub fn load(&self) -> Result<Vec<EvaluationEntry>> {
        self.read_entries()
    }

    fn read_entries(&self) -> Result<Vec<EvaluationEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(rating: u8) -> EvaluationEntry {
        EvaluationEntry {
            input: "Bonjour".to_string(),
            detected_language: "fr".to_string(),
            translated: "Hello".to_string(),
            suggested: "Hi Customer".to_string(),
            rating,
            comments: String::new(),
            recorded_at: None,
        }
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = EvaluationStore::new(dir.path().join("none.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_appends_and_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let store = EvaluationStore::new(dir.path().join("data/nested/evaluations.json"));

        store.save(entry(4)).unwrap();
        store.save(entry(2)).unwrap();

        let saved = store.load().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].rating, 4);
        assert_eq!(saved[1].rating, 2);
        assert!(saved[0].recorded_at.is_some());
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let dir = TempDir::new().unwrap();
        let store = EvaluationStore::new(dir.path().join("evaluations.json"));
        assert!(store.save(entry(0)).is_err());
        assert!(store.save(entry(6)).is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_corrupt_log_is_replaced_on_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("evaluations.json");
        fs::write(&path, "{not json").unwrap();
        let store = EvaluationStore::new(&path);

        assert!(store.load().is_err());
        store.save(entry(5)).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn test_reads_entries_without_timestamp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("evaluations.json");
        fs::write(
            &path,
            r#"[{"input": "Hola", "detected_language": "es", "translated": "Hello",
                 "suggested": "", "rating": 3, "comments": "ok"}]"#,
        )
        .unwrap();
        let saved = EvaluationStore::new(&path).load().unwrap();
        assert_eq!(saved[0].comments, "ok");
        assert!(saved[0].recorded_at.is_none());
    }
}
