//! Call summary derivation and persistence
//!
//! Reads the most recent raw call summary written by the session layer,
//! derives a short lead-facing synopsis, and overwrites the broad-summary
//! document with the full narrative and a capture timestamp.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::StoreError;

/// Returned when there is no narrative to summarize
pub const NO_SUMMARY_MESSAGE: &str = "No call summary available.";

/// Returned when reading the call-summary document fails unexpectedly
pub const SUMMARY_ERROR_MESSAGE: &str = "Error retrieving call summary.";

/// Narrative-bearing fields checked on the latest entry, in priority order
const NARRATIVE_FIELDS: [&str; 4] = ["call_summary", "summary", "assistant_summary", "transcript"];

/// Maximum length of the short summary when no sentence boundary is found
const SHORT_SUMMARY_MAX_CHARS: usize = 160;

/// The broad-summary document, overwritten on every derivation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadSummaryRecord {
    /// Full narrative of the most recent call, possibly empty
    pub narrative: String,
    /// Capture time, UTC ISO-8601 with a trailing "Z"
    pub timestamp: String,
}

/// Derives and persists call summaries.
///
/// `summarize` never fails from the caller's perspective: every failure
/// path terminates in a fixed message string.
pub struct SummaryManager {
    call_summaries_path: PathBuf,
    summary_path: PathBuf,
    lock: Mutex<()>,
}

impl SummaryManager {
    pub fn new(call_summaries_path: impl Into<PathBuf>, summary_path: impl Into<PathBuf>) -> Self {
        Self {
            call_summaries_path: call_summaries_path.into(),
            summary_path: summary_path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn summary_path(&self) -> &Path {
        &self.summary_path
    }

    /// Derive the short summary of the latest call and persist the broad one.
    ///
    /// An absent, blank, or unparseable call-summary document yields an
    /// empty narrative; the broad-summary document is still written. Only an
    /// unexpected read failure short-circuits to the fixed error message.
    pub async fn summarize(&self) -> String {
        let _guard = self.lock.lock().await;

        let narrative = match self.latest_narrative().await {
            Ok(narrative) => narrative,
            Err(e) => {
                tracing::error!(
                    path = %self.call_summaries_path.display(),
                    error = %e,
                    "Failed to read call summaries"
                );
                return SUMMARY_ERROR_MESSAGE.to_string();
            }
        };

        let short = short_summary(&narrative);

        let record = BroadSummaryRecord {
            narrative,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        };
        if let Err(e) = self.write_broad_summary(&record).await {
            tracing::error!(
                path = %self.summary_path.display(),
                error = %e,
                "Failed to write broad summary"
            );
        }

        short
    }

    /// Narrative text of the last entry in the call-summary document
    async fn latest_narrative(&self) -> Result<String, StoreError> {
        let content = match tokio::fs::read_to_string(&self.call_summaries_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(String::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(String::new());
        }

        let entries: Vec<Value> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(
                    path = %self.call_summaries_path.display(),
                    error = %e,
                    "Failed to parse call summaries"
                );
                return Ok(String::new());
            }
        };

        Ok(entries.last().map(narrative_from_entry).unwrap_or_default())
    }

    async fn write_broad_summary(&self, record: &BroadSummaryRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.summary_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let serialized = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&self.summary_path, serialized).await?;
        Ok(())
    }
}

/// Select the narrative text from a call-summary entry.
///
/// Objects are checked for the known narrative fields in priority order,
/// skipping empty values, and dumped whole when none match. Non-object
/// entries are stringified.
fn narrative_from_entry(entry: &Value) -> String {
    match entry {
        Value::Object(map) => NARRATIVE_FIELDS
            .iter()
            .find_map(|field| {
                map.get(*field)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| serde_json::to_string(map).unwrap_or_default()),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Split text after sentence-ending punctuation followed by whitespace,
/// keeping the punctuation with its sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if matches!(c, '.' | '!' | '?') {
            let boundary = i + c.len_utf8();
            if text[boundary..].starts_with(|w: char| w.is_whitespace()) {
                sentences.push(&text[start..boundary]);
                start = boundary;
                while let Some(&(j, w)) = iter.peek() {
                    if w.is_whitespace() {
                        iter.next();
                        start = j + w.len_utf8();
                    } else {
                        start = j;
                        break;
                    }
                }
            }
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Derive the short, lead-facing summary from the full narrative.
///
/// The first complete sentence wins; without one the narrative is truncated
/// to 160 characters with a trailing ellipsis marker; an empty narrative
/// maps to the fixed no-summary message.
pub fn short_summary(narrative: &str) -> String {
    if narrative.is_empty() {
        return NO_SUMMARY_MESSAGE.to_string();
    }

    let trimmed = narrative.trim();
    let first_sentence = split_sentences(trimmed)
        .into_iter()
        .map(str::trim)
        .find(|s| !s.is_empty() && s.ends_with(['.', '!', '?']));

    if let Some(sentence) = first_sentence {
        return sentence.to_string();
    }

    if trimmed.chars().count() > SHORT_SUMMARY_MAX_CHARS {
        let cut: String = trimmed.chars().take(SHORT_SUMMARY_MAX_CHARS).collect();
        format!("{}...", cut)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manager(dir: &std::path::Path) -> SummaryManager {
        SummaryManager::new(dir.join("call_summaries.json"), dir.join("summary.json"))
    }

    async fn write_entries(dir: &std::path::Path, entries: Value) {
        tokio::fs::write(
            dir.join("call_summaries.json"),
            serde_json::to_string(&entries).unwrap(),
        )
        .await
        .unwrap();
    }

    async fn read_broad(dir: &std::path::Path) -> BroadSummaryRecord {
        let content = tokio::fs::read_to_string(dir.join("summary.json"))
            .await
            .unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[tokio::test]
    async fn test_first_sentence_wins() {
        let dir = tempfile::tempdir().unwrap();
        write_entries(
            dir.path(),
            json!([{"call_summary": "First sentence. Second sentence."}]),
        )
        .await;

        let short = manager(dir.path()).summarize().await;
        assert_eq!(short, "First sentence.");

        let broad = read_broad(dir.path()).await;
        assert_eq!(broad.narrative, "First sentence. Second sentence.");
    }

    #[tokio::test]
    async fn test_absent_document_still_writes_broad_summary() {
        let dir = tempfile::tempdir().unwrap();

        let short = manager(dir.path()).summarize().await;
        assert_eq!(short, NO_SUMMARY_MESSAGE);

        let broad = read_broad(dir.path()).await;
        assert!(broad.narrative.is_empty());
        assert!(broad.timestamp.ends_with('Z'));
        assert!(broad.timestamp.contains('T'));
    }

    #[tokio::test]
    async fn test_long_narrative_without_punctuation_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let narrative: String = "a".repeat(200);
        write_entries(dir.path(), json!([{"call_summary": narrative}])).await;

        let short = manager(dir.path()).summarize().await;
        assert_eq!(short.chars().count(), 163);
        assert!(short.ends_with("..."));
        assert!(short.starts_with(&"a".repeat(160)));
    }

    #[tokio::test]
    async fn test_malformed_document_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("call_summaries.json"), "{broken")
            .await
            .unwrap();

        let short = manager(dir.path()).summarize().await;
        assert_eq!(short, NO_SUMMARY_MESSAGE);

        let broad = read_broad(dir.path()).await;
        assert!(broad.narrative.is_empty());
    }

    #[tokio::test]
    async fn test_only_last_entry_is_read() {
        let dir = tempfile::tempdir().unwrap();
        write_entries(
            dir.path(),
            json!([
                {"call_summary": "Old call."},
                {"call_summary": "New call. More detail."}
            ]),
        )
        .await;

        let short = manager(dir.path()).summarize().await;
        assert_eq!(short, "New call.");
    }

    #[test]
    fn test_narrative_field_priority() {
        let entry = json!({"summary": "Fallback.", "call_summary": "Primary."});
        assert_eq!(narrative_from_entry(&entry), "Primary.");

        let entry = json!({"call_summary": "", "summary": "Fallback."});
        assert_eq!(narrative_from_entry(&entry), "Fallback.");

        let entry = json!({"transcript": "Agent: hello."});
        assert_eq!(narrative_from_entry(&entry), "Agent: hello.");
    }

    #[test]
    fn test_narrative_fallbacks() {
        let entry = json!({"speaker": "agent"});
        assert!(narrative_from_entry(&entry).contains("speaker"));

        let entry = json!("just text");
        assert_eq!(narrative_from_entry(&entry), "just text");

        let entry = json!(42);
        assert_eq!(narrative_from_entry(&entry), "42");
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("One. Two! Three?"),
            vec!["One.", "Two!", "Three?"]
        );
        assert_eq!(split_sentences("No boundary here"), vec!["No boundary here"]);
        assert_eq!(
            split_sentences("Dotted.middle stays. Next"),
            vec!["Dotted.middle stays.", "Next"]
        );
    }

    #[test]
    fn test_short_summary_edges() {
        assert_eq!(short_summary(""), NO_SUMMARY_MESSAGE);
        assert_eq!(short_summary("Tiny note"), "Tiny note");
        assert_eq!(short_summary("Hello there. Bye."), "Hello there.");
    }
}
