use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::board::apply::{
    ApplicationForm, ApplicationRecord, ApplicationSink, MemorySink, SinkError,
};
use crate::board::catalog::{Job, JobCatalog, JobId};
use crate::board::events::JobBoard;
use crate::board::router::{board_router, SharedBoard};
use crate::board::storage::{KeyValueStore, MemoryStore, StorageError};

pub(super) fn catalog() -> JobCatalog {
    JobCatalog::seed()
}

pub(super) fn ids(jobs: &[&Job]) -> Vec<u32> {
    jobs.iter().map(|job| job.id.0).collect()
}

pub(super) fn card_ids(ids: Vec<JobId>) -> Vec<u32> {
    ids.into_iter().map(|id| id.0).collect()
}

pub(super) fn board() -> JobBoard<MemoryStore, MemorySink> {
    JobBoard::new(catalog(), MemoryStore::default(), MemorySink::default())
}

pub(super) fn form() -> ApplicationForm {
    ApplicationForm {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        resume: "ada-resume.pdf".to_string(),
        message: "Happy to chat.".to_string(),
    }
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 20, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Reads work, every write fails.
#[derive(Debug, Default)]
pub(super) struct ReadOnlyStore {
    pub(super) inner: MemoryStore,
    pub(super) attempts: Mutex<usize>,
}

impl KeyValueStore for ReadOnlyStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&self, _key: &str, _value: String) -> Result<(), StorageError> {
        *self.attempts.lock().expect("attempts mutex") += 1;
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }
}

pub(super) struct OfflineStore;

impl KeyValueStore for OfflineStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn write(&self, _key: &str, _value: String) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

#[derive(Debug, Default, Clone)]
pub(super) struct FailingSink {
    pub(super) attempts: Arc<Mutex<usize>>,
}

impl ApplicationSink for FailingSink {
    fn deliver(&self, _record: &ApplicationRecord) -> Result<(), SinkError> {
        *self.attempts.lock().expect("attempts mutex") += 1;
        Err(SinkError::Unavailable("outbox offline".to_string()))
    }
}

pub(super) fn shared_board() -> SharedBoard<MemoryStore, MemorySink> {
    Arc::new(Mutex::new(board()))
}

pub(super) fn router_for(board: SharedBoard<MemoryStore, MemorySink>) -> axum::Router {
    board_router(board)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
