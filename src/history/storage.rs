//! Persistent storage of visit history.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A single history entry tracking how often a chapter page has been opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitEntry {
    /// The option value the visit was recorded under.
    pub value: String,
    /// Display label at the time of the visit.
    pub label: String,
    /// Number of times this page has been opened.
    pub count: u64,
    /// When this page was last opened.
    pub last_visited: DateTime<Utc>,
}

/// All recorded visits, keyed by option value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitLog {
    pub entries: HashMap<String, VisitEntry>,
}

impl VisitLog {
    /// Record one visit.
    pub fn record_visit(&mut self, value: &str, label: &str) {
        let entry = self
            .entries
            .entry(value.to_string())
            .or_insert_with(|| VisitEntry {
                value: value.to_string(),
                label: label.to_string(),
                count: 0,
                last_visited: Utc::now(),
            });

        entry.count += 1;
        entry.last_visited = Utc::now();
        // Keep the label current in case the table changed
        entry.label = label.to_string();
    }

    /// Most visited entries, sorted by count (descending).
    pub fn most_visited(&self, limit: usize) -> Vec<&VisitEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(limit);
        entries
    }
}

/// Manages visit history with persistent storage.
#[derive(Debug)]
pub struct VisitTracker {
    storage_path: PathBuf,
    log: VisitLog,
}

impl VisitTracker {
    /// Create a tracker backed by the XDG data directory.
    ///
    /// Existing history is loaded if available; a corrupt file starts fresh.
    pub fn new() -> Result<Self> {
        let storage_path = default_storage_path()?;
        Self::with_storage_path(storage_path)
    }

    /// Create a tracker with an explicit storage file (used by tests).
    pub fn with_storage_path(storage_path: PathBuf) -> Result<Self> {
        if let Some(parent) = storage_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory: {}", parent.display())
            })?;
        }

        let log = if storage_path.exists() {
            load_log(&storage_path).unwrap_or_default()
        } else {
            VisitLog::default()
        };

        Ok(Self { storage_path, log })
    }

    /// Record a visit and save to disk.
    pub fn record(&mut self, value: &str, label: &str) -> Result<()> {
        self.log.record_visit(value, label);
        self.save()
    }

    /// History entry for a value, if any visit has been recorded.
    pub fn entry(&self, value: &str) -> Option<&VisitEntry> {
        self.log.entries.get(value)
    }

    /// Most visited entries, sorted by count (descending).
    pub fn most_visited(&self, limit: usize) -> Vec<&VisitEntry> {
        self.log.most_visited(limit)
    }

    pub fn has_visits(&self) -> bool {
        !self.log.entries.is_empty()
    }

    fn save(&self) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&self.log).context("Failed to serialize visit history")?;

        fs::write(&self.storage_path, json).with_context(|| {
            format!(
                "Failed to write history file: {}",
                self.storage_path.display()
            )
        })?;

        Ok(())
    }
}

fn default_storage_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", "velg")
        .context("Failed to determine application data directory")?;

    Ok(proj_dirs.data_dir().join("visits.json"))
}

fn load_log(path: &Path) -> Result<VisitLog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;

    let log: VisitLog = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse history file: {}", path.display()))?;

    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_visit_log_record() {
        let mut log = VisitLog::default();

        log.record_visit("agder", "Agder");
        assert_eq!(log.entries.get("agder").unwrap().count, 1);

        log.record_visit("agder", "Agder");
        assert_eq!(log.entries.get("agder").unwrap().count, 2);

        log.record_visit("troms", "Troms");
        assert_eq!(log.entries.len(), 2);
    }

    #[test]
    fn test_visit_log_most_visited() {
        let mut log = VisitLog::default();

        for _ in 0..5 {
            log.record_visit("rogaland", "Rogaland");
        }
        for _ in 0..3 {
            log.record_visit("agder", "Agder");
        }
        log.record_visit("troms", "Troms");

        let top = log.most_visited(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].value, "rogaland");
        assert_eq!(top[0].count, 5);
        assert_eq!(top[1].value, "agder");
    }

    #[test]
    fn test_tracker_record_and_persist() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("visits.json");

        {
            let mut tracker = VisitTracker::with_storage_path(path.clone()).unwrap();
            tracker.record("agder", "Agder").unwrap();
            tracker.record("agder", "Agder").unwrap();
        }

        {
            let tracker = VisitTracker::with_storage_path(path).unwrap();
            assert!(tracker.has_visits());
            assert_eq!(tracker.entry("agder").unwrap().count, 2);
        }
    }

    #[test]
    fn test_tracker_label_updates_on_revisit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("visits.json");

        let mut tracker = VisitTracker::with_storage_path(path).unwrap();
        tracker.record("mr", "More og Romsdal").unwrap();
        tracker.record("mr", "Møre og Romsdal").unwrap();

        assert_eq!(tracker.entry("mr").unwrap().label, "Møre og Romsdal");
    }

    #[test]
    fn test_corrupted_history_file_starts_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("visits.json");
        fs::write(&path, "not valid json").unwrap();

        let tracker = VisitTracker::with_storage_path(path).unwrap();
        assert!(!tracker.has_visits());
    }

    #[test]
    fn test_visit_entry_serialization() {
        let entry = VisitEntry {
            value: "agder".to_string(),
            label: "Agder".to_string(),
            count: 42,
            last_visited: Utc::now(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: VisitEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.value, "agder");
        assert_eq!(parsed.count, 42);
    }
}
