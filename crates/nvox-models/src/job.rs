//! Job record and lifecycle state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Maximum stored length of a failure message, in characters.
///
/// Matches the `error_message` column budget in the durable store.
pub const MAX_ERROR_LEN: usize = 2000;

/// Unique identifier for a generation job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a job record.
///
/// The wire/store form is the uppercase name (`PENDING`, `PROCESSING`,
/// `COMPLETE`, `FAILED`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Job is waiting in queue, set at creation by the producer
    #[default]
    Pending,
    /// Job is being processed by a worker
    Processing,
    /// Job finished and its artifact is stored (terminal)
    Complete,
    /// Job failed permanently (terminal)
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Processing => "PROCESSING",
            JobStatus::Complete => "COMPLETE",
            JobStatus::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Complete | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for a transition the lifecycle does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("job is already terminal ({0})")]
    Terminal(JobStatus),

    #[error("cannot complete a job in state {0}")]
    NotProcessing(JobStatus),
}

/// A generation job: one prompt to be turned into a narrated artifact.
///
/// The durable store owns the record; a worker holds this in-memory
/// view only for the duration of one processing attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job ID
    pub id: JobId,

    /// Prompt text to narrate
    pub prompt: String,

    /// Lifecycle status
    #[serde(default)]
    pub status: JobStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// Started at timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    /// Completed at timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Artifact location (set on COMPLETE)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,

    /// Error message (set on FAILED, truncated to [`MAX_ERROR_LEN`])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Progress (0-100, reaches 100 only on COMPLETE)
    #[serde(default)]
    pub progress: u8,
}

impl Job {
    /// Create a new pending job.
    pub fn new(id: JobId, prompt: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            prompt: prompt.into(),
            status: JobStatus::Pending,
            created_at: now,
            updated_at: now,
            started_at: None,
            completed_at: None,
            storage_key: None,
            error_message: None,
            progress: 0,
        }
    }

    /// Start processing the job.
    ///
    /// Idempotent under redelivery: an existing start timestamp is
    /// preserved, not overwritten.
    pub fn start(mut self) -> Result<Self, StatusError> {
        if self.status.is_terminal() {
            return Err(StatusError::Terminal(self.status));
        }
        self.status = JobStatus::Processing;
        self.started_at.get_or_insert_with(Utc::now);
        self.updated_at = Utc::now();
        Ok(self)
    }

    /// Mark the job complete with the stored artifact location.
    pub fn complete(mut self, storage_key: impl Into<String>) -> Result<Self, StatusError> {
        if self.status.is_terminal() {
            return Err(StatusError::Terminal(self.status));
        }
        if self.status != JobStatus::Processing {
            return Err(StatusError::NotProcessing(self.status));
        }
        self.status = JobStatus::Complete;
        self.storage_key = Some(storage_key.into());
        self.progress = 100;
        self.completed_at = Some(Utc::now());
        self.updated_at = Utc::now();
        Ok(self)
    }

    /// Mark the job failed with a truncated error message.
    pub fn fail(mut self, error: impl AsRef<str>) -> Result<Self, StatusError> {
        if self.status.is_terminal() {
            return Err(StatusError::Terminal(self.status));
        }
        self.status = JobStatus::Failed;
        self.error_message = Some(truncate_error(error.as_ref()));
        self.updated_at = Utc::now();
        Ok(self)
    }
}

/// Truncate a failure message to the store's column budget.
pub fn truncate_error(msg: &str) -> String {
    msg.chars().take(MAX_ERROR_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_creation() {
        let job = Job::new(JobId::from_string("job-1"), "Hello world.");

        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.progress, 0);
        assert!(job.started_at.is_none());
    }

    #[test]
    fn test_job_lifecycle() {
        let job = Job::new(JobId::new(), "a prompt");

        let started = job.start().unwrap();
        assert_eq!(started.status, JobStatus::Processing);
        assert!(started.started_at.is_some());

        let completed = started.complete("https://cdn.example/videos/a.mp4").unwrap();
        assert_eq!(completed.status, JobStatus::Complete);
        assert_eq!(completed.progress, 100);
        assert!(completed.completed_at.is_some());
        assert!(completed.storage_key.is_some());
    }

    #[test]
    fn test_start_preserves_original_start_time() {
        let job = Job::new(JobId::new(), "a prompt");

        let started = job.start().unwrap();
        let first_start = started.started_at;

        // Redelivery: starting again must not overwrite the timestamp.
        let restarted = started.start().unwrap();
        assert_eq!(restarted.started_at, first_start);
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let completed = Job::new(JobId::new(), "p")
            .start()
            .unwrap()
            .complete("loc")
            .unwrap();
        assert_eq!(
            completed.clone().start().unwrap_err(),
            StatusError::Terminal(JobStatus::Complete)
        );
        assert_eq!(
            completed.fail("boom").unwrap_err(),
            StatusError::Terminal(JobStatus::Complete)
        );

        let failed = Job::new(JobId::new(), "p").start().unwrap().fail("boom").unwrap();
        assert_eq!(
            failed.complete("loc").unwrap_err(),
            StatusError::Terminal(JobStatus::Failed)
        );
    }

    #[test]
    fn test_complete_requires_processing() {
        let pending = Job::new(JobId::new(), "p");
        assert_eq!(
            pending.complete("loc").unwrap_err(),
            StatusError::NotProcessing(JobStatus::Pending)
        );
    }

    #[test]
    fn test_fail_truncates_message() {
        let long = "x".repeat(MAX_ERROR_LEN + 500);
        let failed = Job::new(JobId::new(), "p").start().unwrap().fail(&long).unwrap();
        assert_eq!(failed.error_message.unwrap().chars().count(), MAX_ERROR_LEN);
    }

    #[test]
    fn test_status_wire_form() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Processing).unwrap(),
            "\"PROCESSING\""
        );
        assert_eq!(JobStatus::Failed.as_str(), "FAILED");
        assert!(JobStatus::Complete.is_terminal());
        assert!(!JobStatus::Pending.is_terminal());
    }
}
