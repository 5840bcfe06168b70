use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::catalog::{JobCatalog, JobId};

/// Free-text fields of the apply form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub message: String,
}

/// Modal contents for one apply session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationDraft {
    pub job_id: JobId,
    pub job_title: String,
    pub form: ApplicationForm,
}

/// Finalized application handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub job_id: JobId,
    pub job_title: String,
    pub name: String,
    pub email: String,
    pub resume: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Submission time as an ISO-8601 string with millisecond precision.
    pub fn submitted_at_iso(&self) -> String {
        self.submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    Dismissed,
    OutsideClick,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Name,
    Email,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::Name => "name",
            RequiredField::Email => "email",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("no application is open")]
    NotOpen,
    #[error("required field '{}' is missing", .0.label())]
    MissingField(RequiredField),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Receiver of finalized applications.
pub trait ApplicationSink: Send + Sync {
    fn deliver(&self, record: &ApplicationRecord) -> Result<(), SinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("application sink unavailable: {0}")]
    Unavailable(String),
}

/// Acknowledges applications by logging them; nothing leaves the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ApplicationSink for LogSink {
    fn deliver(&self, record: &ApplicationRecord) -> Result<(), SinkError> {
        info!(
            job_id = %record.job_id,
            job_title = %record.job_title,
            name = %record.name,
            email = %record.email,
            resume = %record.resume,
            submitted_at = %record.submitted_at_iso(),
            "application submitted"
        );
        Ok(())
    }
}

/// Collects records so callers can inspect what was submitted.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<ApplicationRecord>>>,
}

impl MemorySink {
    pub fn records(&self) -> Vec<ApplicationRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl ApplicationSink for MemorySink {
    fn deliver(&self, record: &ApplicationRecord) -> Result<(), SinkError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| SinkError::Unavailable("memory sink poisoned".to_string()))?;
        records.push(record.clone());
        Ok(())
    }
}

/// Apply modal: `Closed -> Open(draft) -> Closed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ApplicationFlow {
    #[default]
    Closed,
    Open(ApplicationDraft),
}

impl ApplicationFlow {
    pub fn is_open(&self) -> bool {
        matches!(self, ApplicationFlow::Open(_))
    }

    pub fn draft(&self) -> Option<&ApplicationDraft> {
        match self {
            ApplicationFlow::Open(draft) => Some(draft),
            ApplicationFlow::Closed => None,
        }
    }

    /// Open the modal for `job_id`, replacing any current draft.
    ///
    /// Unknown ids leave the flow untouched and return `false`.
    pub fn open(&mut self, catalog: &JobCatalog, job_id: JobId) -> bool {
        let Some(job) = catalog.get(job_id) else {
            debug!(%job_id, "apply ignored for unknown job");
            return false;
        };

        *self = ApplicationFlow::Open(ApplicationDraft {
            job_id,
            job_title: job.title.clone(),
            form: ApplicationForm::default(),
        });
        true
    }

    pub fn close(&mut self, reason: CloseReason) {
        if let ApplicationFlow::Open(draft) = self {
            debug!(job_id = %draft.job_id, ?reason, "application modal closed");
        }
        *self = ApplicationFlow::Closed;
    }

    pub fn submit<K>(
        &mut self,
        form: ApplicationForm,
        sink: &K,
    ) -> Result<ApplicationRecord, ApplicationError>
    where
        K: ApplicationSink + ?Sized,
    {
        self.submit_at(form, sink, Utc::now())
    }

    /// Validate, build the record stamped with `submitted_at`, deliver, then close.
    ///
    /// On any error the modal stays open and keeps the entered values.
    pub fn submit_at<K>(
        &mut self,
        form: ApplicationForm,
        sink: &K,
        submitted_at: DateTime<Utc>,
    ) -> Result<ApplicationRecord, ApplicationError>
    where
        K: ApplicationSink + ?Sized,
    {
        let ApplicationFlow::Open(draft) = self else {
            return Err(ApplicationError::NotOpen);
        };
        draft.form = form;

        if draft.form.name.trim().is_empty() {
            return Err(ApplicationError::MissingField(RequiredField::Name));
        }
        if draft.form.email.trim().is_empty() {
            return Err(ApplicationError::MissingField(RequiredField::Email));
        }

        let record = ApplicationRecord {
            job_id: draft.job_id,
            job_title: draft.job_title.clone(),
            name: draft.form.name.clone(),
            email: draft.form.email.clone(),
            resume: draft.form.resume.clone(),
            message: draft.form.message.clone(),
            submitted_at,
        };

        if let Err(err) = sink.deliver(&record) {
            warn!(job_id = %record.job_id, error = %err, "application not delivered");
            return Err(err.into());
        }

        self.close(CloseReason::Submitted);
        Ok(record)
    }
}
