//! JSON document persistence for the SDR agent
//!
//! Provides the data-management layer behind the agent's tools:
//! - FAQ document (read-only, loaded once at startup)
//! - Lead collection (append-only)
//! - Call summaries in, broad summary out
//!
//! Each disk-backed store serializes its read-modify-write cycle behind its
//! own async mutex, so stores shared across concurrent sessions cannot lose
//! updates. There is no cross-process lock; a single process is assumed to
//! own the data directory.

pub mod error;
pub mod faq;
pub mod leads;
pub mod summary;

use std::path::PathBuf;
use std::sync::Arc;

pub use error::StoreError;
pub use faq::{FaqDocument, FaqQuery, FaqStore, NO_DATA_MESSAGE};
pub use leads::{JsonLeadStore, LeadStore};
pub use summary::{
    BroadSummaryRecord, SummaryManager, NO_SUMMARY_MESSAGE, SUMMARY_ERROR_MESSAGE,
};

/// Paths to the agent's backing documents
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub faq: PathBuf,
    pub leads: PathBuf,
    pub call_summaries: PathBuf,
    pub summary: PathBuf,
}

/// Initialize the persistence layer from a set of document paths
pub fn init(paths: DataPaths) -> PersistenceLayer {
    PersistenceLayer {
        faq: Arc::new(FaqStore::load(&paths.faq)),
        leads: Arc::new(JsonLeadStore::new(paths.leads)),
        summaries: Arc::new(SummaryManager::new(paths.call_summaries, paths.summary)),
    }
}

/// Combined persistence layer with all stores
pub struct PersistenceLayer {
    pub faq: Arc<FaqStore>,
    pub leads: Arc<JsonLeadStore>,
    pub summaries: Arc<SummaryManager>,
}
