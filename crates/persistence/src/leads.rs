//! Lead collection persistence
//!
//! The collection is a single JSON document holding an ordered sequence of
//! lead records. Appends are read-modify-write: the whole sequence is read,
//! extended, and written back, serialized behind the store's mutex.
//!
//! Unreadable prior content is never silently destroyed. Before a fresh
//! collection is written over a malformed document, the old bytes are
//! quarantined to a `<file>.corrupt.<unix-seconds>` sibling; if that rename
//! fails, the append is refused.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use sdr_agent_core::LeadRecord;

use crate::StoreError;

/// Append-only store of qualified leads
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Append a record to the collection, returning the new record count
    async fn append(&self, lead: &LeadRecord) -> Result<usize, StoreError>;

    /// Read the full collection in insertion order
    async fn all(&self) -> Result<Vec<LeadRecord>, StoreError>;
}

/// JSON-file-backed lead store
pub struct JsonLeadStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonLeadStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the collection, quarantining malformed content.
    ///
    /// Absent or blank documents are an empty sequence. A document that does
    /// not parse as a lead sequence is renamed aside and replaced by an
    /// empty sequence; the rename failing is the only error path.
    async fn read_or_quarantine(&self) -> Result<Vec<LeadRecord>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Could not read lead collection");
                return Ok(Vec::new());
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<LeadRecord>>(&content) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Lead collection is malformed, quarantining"
                );
                self.quarantine().await?;
                Ok(Vec::new())
            }
        }
    }

    /// Move the malformed document aside so the next write cannot destroy it
    async fn quarantine(&self) -> Result<(), StoreError> {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "leads.json".to_string());
        let quarantined =
            self.path
                .with_file_name(format!("{}.corrupt.{}", file_name, Utc::now().timestamp()));

        tokio::fs::rename(&self.path, &quarantined)
            .await
            .map_err(|e| StoreError::Quarantine {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::warn!(
            from = %self.path.display(),
            to = %quarantined.display(),
            "Quarantined unreadable lead collection"
        );
        Ok(())
    }

    async fn write(&self, records: &[LeadRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let serialized = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, serialized).await?;
        Ok(())
    }
}

#[async_trait]
impl LeadStore for JsonLeadStore {
    async fn append(&self, lead: &LeadRecord) -> Result<usize, StoreError> {
        let _guard = self.lock.lock().await;

        let mut records = self.read_or_quarantine().await?;
        records.push(lead.clone());
        self.write(&records).await?;

        tracing::info!(
            path = %self.path.display(),
            count = records.len(),
            lead = %lead.lead_name,
            "Lead record appended"
        );
        Ok(records.len())
    }

    async fn all(&self) -> Result<Vec<LeadRecord>, StoreError> {
        let _guard = self.lock.lock().await;

        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => {
                match serde_json::from_str::<Vec<LeadRecord>>(&content) {
                    Ok(records) => Ok(records),
                    Err(e) => {
                        tracing::error!(path = %self.path.display(), error = %e, "Lead collection is malformed");
                        Ok(Vec::new())
                    }
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn lead(name: &str) -> LeadRecord {
        LeadRecord {
            lead_name: name.to_string(),
            company: "Acme".to_string(),
            title: "COO".to_string(),
            email: format!("{}@acme.example", name.to_lowercase()),
            phone: "9876543210".to_string(),
            location: "Mumbai".to_string(),
            primary_pain_points: vec!["latency".to_string()],
            current_solution: "none".to_string(),
            budget_estimate: "unknown".to_string(),
            decision_timeline: "3 months".to_string(),
            decision_maker_confirmed: "yes".to_string(),
            interest_level: "high".to_string(),
            meeting_scheduled: "no".to_string(),
            meeting_time: String::new(),
            source: "voice_call".to_string(),
            notes: String::new(),
            recommended_next_step: "Send demo invite".to_string(),
            timestamp: "2025-10-28T09:12:44Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_append_creates_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLeadStore::new(dir.path().join("leads.json"));

        assert_eq!(store.append(&lead("Asha")).await.unwrap(), 1);
        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].lead_name, "Asha");
    }

    #[tokio::test]
    async fn test_sequential_appends_preserve_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLeadStore::new(dir.path().join("leads.json"));

        for name in ["Asha", "Bilal", "Chitra"] {
            store.append(&lead(name)).await.unwrap();
        }

        let all = store.all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|r| r.lead_name.as_str()).collect();
        assert_eq!(names, ["Asha", "Bilal", "Chitra"]);
    }

    #[tokio::test]
    async fn test_round_trip_fidelity() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLeadStore::new(dir.path().join("leads.json"));

        let original = lead("Asha");
        store.append(&original).await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all[0], original);
    }

    #[tokio::test]
    async fn test_blank_document_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");
        tokio::fs::write(&path, "   \n").await.unwrap();

        let store = JsonLeadStore::new(&path);
        assert_eq!(store.append(&lead("Asha")).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_malformed_document_is_quarantined() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.json");
        tokio::fs::write(&path, "{definitely not a lead array")
            .await
            .unwrap();

        let store = JsonLeadStore::new(&path);
        assert_eq!(store.append(&lead("Asha")).await.unwrap(), 1);

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 1);

        let quarantined: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".corrupt."))
            .collect();
        assert_eq!(quarantined.len(), 1);

        let preserved = std::fs::read_to_string(quarantined[0].path()).unwrap();
        assert_eq!(preserved, "{definitely not a lead array");
    }

    #[tokio::test]
    async fn test_concurrent_appends_lose_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonLeadStore::new(dir.path().join("leads.json")));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.append(&lead(&format!("Lead{}", i))).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.all().await.unwrap().len(), 8);
    }
}
