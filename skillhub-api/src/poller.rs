use crate::client::Client;
use crate::endpoints::import::{
    GetImportJob, ImportJob, ImportJobStatus, ImportOutcome, ImportReport, SubmitImport,
};
use crate::error::ApiError;
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug)]
pub enum ImportError {
    /// Transport or API failure on the initial submission. Poll-tick failures
    /// are retried and never surface here.
    Api(ApiError),
    /// The job reached the `failed` terminal status; carries its `last_error`.
    JobFailed(String),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Api(e) => write!(f, "Import request failed: {}", e),
            ImportError::JobFailed(reason) => write!(f, "Import job failed: {}", reason),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<ApiError> for ImportError {
    fn from(value: ApiError) -> Self {
        ImportError::Api(value)
    }
}

/// Drives a repository submission to a terminal outcome whether the registry
/// resolves it synchronously or hands back a job.
///
/// Polls job status once immediately, then on a fixed interval. Ticks are
/// strictly sequential: the next sleep starts only after the previous poll's
/// response has been handled, so a slow poll cannot overlap the next one.
pub struct ImportPoller {
    client: Arc<Client>,
    interval: Duration,
}

impl ImportPoller {
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            client,
            interval: POLL_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Submit and wait for the terminal outcome.
    pub async fn run(&self, request: SubmitImport) -> Result<ImportReport, ImportError> {
        self.run_with(request, |_| {}).await
    }

    /// Submit and wait, invoking `observe` with every polled job snapshot.
    pub async fn run_with(
        &self,
        request: SubmitImport,
        observe: impl FnMut(&ImportJob),
    ) -> Result<ImportReport, ImportError> {
        match self.client.send(request).await? {
            ImportOutcome::Immediate(report) => Ok(report),
            ImportOutcome::Queued(ticket) => {
                tracing::info!(job_id = %ticket.job_id, "import queued: {}", ticket.message);
                self.wait_for_job(&ticket.job_id, observe).await
            }
        }
    }

    /// Poll a job until it is terminal. The first poll happens immediately so
    /// a fast job does not wait out a full interval. Transport errors on a
    /// tick are logged and retried on the next tick; only a terminal status
    /// ends the loop.
    pub async fn wait_for_job(
        &self,
        job_id: &str,
        mut observe: impl FnMut(&ImportJob),
    ) -> Result<ImportReport, ImportError> {
        loop {
            match self.client.send(GetImportJob::new(job_id)).await {
                Ok(response) => {
                    let job = response.job;
                    observe(&job);
                    match job.status {
                        ImportJobStatus::Completed => {
                            tracing::info!(
                                job_id,
                                imported = response.success_count,
                                rejected = response.failed_count,
                                "import job completed"
                            );
                            return Ok(ImportReport::from_job(&job));
                        }
                        ImportJobStatus::Failed => {
                            let reason = job
                                .last_error
                                .unwrap_or_else(|| "import job failed".to_string());
                            return Err(ImportError::JobFailed(reason));
                        }
                        ImportJobStatus::Pending | ImportJobStatus::Processing => {}
                    }
                }
                Err(e) => {
                    tracing::warn!(job_id, "import job poll failed, will retry: {}", e);
                }
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}
