use super::FullSkillId;
use crate::client::{Method, Request, RequestData};
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

/// One skill successfully imported from a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub path: String,
    pub full_id: FullSkillId,
    pub name: String,
}

/// One candidate the importer rejected, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRejection {
    pub path: String,
    pub reason: String,
}

/// Normalized import outcome, identical for synchronous submissions and for
/// completed asynchronous jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub success: bool,
    #[serde(default)]
    pub imported: Vec<ImportResult>,
    #[serde(default)]
    pub rejected: Vec<ImportRejection>,
}

impl ImportReport {
    /// Synthesize the normalized report from a terminal job.
    pub fn from_job(job: &ImportJob) -> Self {
        Self {
            success: job.status == ImportJobStatus::Completed,
            imported: job.imported_skills.clone().unwrap_or_default(),
            rejected: job.rejected_skills.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportJobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ImportJobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ImportJobStatus::Completed | ImportJobStatus::Failed)
    }
}

/// Server-side import job. Created by the registry on submission; this client
/// only ever observes it through polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportJob {
    pub id: String,
    pub github_url: String,
    pub user_id: Option<String>,
    pub is_private: bool,
    pub status: ImportJobStatus,
    pub retry_count: u32,
    pub max_retries: u32,
    pub last_error: Option<String>,
    pub imported_skills: Option<Vec<ImportResult>>,
    pub rejected_skills: Option<Vec<ImportRejection>>,
    pub worker_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Acknowledgement for a submission the registry queued instead of resolving
/// synchronously.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportJobTicket {
    pub success: bool,
    pub job_id: String,
    pub status: ImportJobStatus,
    pub message: String,
}

/// The two shapes `POST /import` can answer with, discriminated by the
/// presence of `job_id`. Match exhaustively at the call site.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ImportOutcome {
    Queued(ImportJobTicket),
    Immediate(ImportReport),
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct SubmitImport {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_private: Option<bool>,
}

impl SubmitImport {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_private: None,
        }
    }

    setter!(opt is_private: bool);
}

impl Request for SubmitImport {
    type Data = Self;
    type Response = ImportOutcome;

    fn endpoint(&self) -> Cow<'_, str> {
        "/import".into()
    }

    fn method(&self) -> Method {
        Method::POST
    }

    fn data(&self) -> RequestData<&Self> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct GetImportJob {
    job_id: String,
}

impl GetImportJob {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

impl Request for GetImportJob {
    type Data = ();
    type Response = ImportJobStatusResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/import/jobs/{}", self.job_id).into()
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportJobStatusResponse {
    pub job: ImportJob,
    pub success_count: u32,
    pub failed_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_with_job_id_parses_as_queued() {
        let body = r#"{"success":true,"job_id":"J1","status":"pending","message":"queued"}"#;
        match serde_json::from_str::<ImportOutcome>(body).unwrap() {
            ImportOutcome::Queued(ticket) => {
                assert_eq!(ticket.job_id, "J1");
                assert_eq!(ticket.status, ImportJobStatus::Pending);
            }
            other => panic!("expected Queued, got {other:?}"),
        }
    }

    #[test]
    fn outcome_without_job_id_parses_as_immediate() {
        let body = r#"{
            "success": true,
            "imported": [{"path":"a","full_id":"x/y","name":"Y"}],
            "rejected": []
        }"#;
        match serde_json::from_str::<ImportOutcome>(body).unwrap() {
            ImportOutcome::Immediate(report) => {
                assert!(report.success);
                assert_eq!(report.imported.len(), 1);
                assert_eq!(report.imported[0].full_id.to_string(), "x/y");
                assert!(report.rejected.is_empty());
            }
            other => panic!("expected Immediate, got {other:?}"),
        }
    }

    #[test]
    fn terminal_statuses() {
        assert!(!ImportJobStatus::Pending.is_terminal());
        assert!(!ImportJobStatus::Processing.is_terminal());
        assert!(ImportJobStatus::Completed.is_terminal());
        assert!(ImportJobStatus::Failed.is_terminal());
    }
}
