use crate::endpoints::import::{ImportJob, ImportReport, SubmitImport};
use crate::poller::{ImportError, ImportPoller};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Progress of a submission, tagged with its generation so consumers can
/// discard updates from a superseded run that were already in the channel.
#[derive(Debug)]
pub enum ImportUpdate {
    Progress {
        submission: u64,
        job: ImportJob,
    },
    Finished {
        submission: u64,
        result: Result<ImportReport, ImportError>,
    },
}

impl ImportUpdate {
    pub fn submission(&self) -> u64 {
        match self {
            ImportUpdate::Progress { submission, .. } => *submission,
            ImportUpdate::Finished { submission, .. } => *submission,
        }
    }
}

/// Owns at most one in-flight import run.
///
/// A new submission aborts the previous polling task before spawning its own,
/// so two loops can never race. Dropping the runner aborts whatever is still
/// in flight.
pub struct ImportRunner {
    poller: Arc<ImportPoller>,
    updates: mpsc::UnboundedSender<ImportUpdate>,
    task: Option<JoinHandle<()>>,
    submissions: u64,
}

impl ImportRunner {
    pub fn new(poller: ImportPoller) -> (Self, mpsc::UnboundedReceiver<ImportUpdate>) {
        let (updates, receiver) = mpsc::unbounded_channel();
        (
            Self {
                poller: Arc::new(poller),
                updates,
                task: None,
                submissions: 0,
            },
            receiver,
        )
    }

    /// Start a run, superseding any in-flight one. Returns the generation tag
    /// carried by this run's updates.
    pub fn submit(&mut self, request: SubmitImport) -> u64 {
        self.cancel();

        self.submissions += 1;
        let submission = self.submissions;
        let poller = self.poller.clone();
        let updates = self.updates.clone();

        self.task = Some(tokio::spawn(async move {
            let progress = updates.clone();
            let result = poller
                .run_with(request, move |job| {
                    let _ = progress.send(ImportUpdate::Progress {
                        submission,
                        job: job.clone(),
                    });
                })
                .await;
            let _ = updates.send(ImportUpdate::Finished { submission, result });
        }));

        submission
    }

    /// Stop the in-flight run, if any. Already-fired requests are dropped
    /// mid-await and never deliver an update.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.task.take() {
            handle.abort();
        }
    }

    pub fn latest_submission(&self) -> u64 {
        self.submissions
    }
}

impl Drop for ImportRunner {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use serde_json::json;
    use std::time::Duration;

    fn pending_job_body() -> String {
        json!({
            "job": {
                "id": "J1",
                "github_url": "owner/repo",
                "user_id": null,
                "is_private": false,
                "status": "pending",
                "retry_count": 0,
                "max_retries": 3,
                "last_error": null,
                "imported_skills": null,
                "rejected_skills": null,
                "worker_id": null,
                "started_at": null,
                "completed_at": null,
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z"
            },
            "success_count": 0,
            "failed_count": 0
        })
        .to_string()
    }

    fn runner_for(server: &mockito::Server) -> (ImportRunner, mpsc::UnboundedReceiver<ImportUpdate>) {
        let poller = ImportPoller::new(Arc::new(Client::new(server.url())))
            .with_interval(Duration::from_millis(20));
        ImportRunner::new(poller)
    }

    #[tokio::test]
    async fn resubmission_supersedes_previous_run() {
        let mut server = mockito::Server::new_async().await;
        // First submission queues a job that never completes.
        server
            .mock("POST", "/import")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"path":"owner/slow"}"#.to_string(),
            ))
            .with_body(r#"{"success":true,"job_id":"J1","status":"pending","message":"queued"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/import/jobs/J1")
            .with_body(pending_job_body())
            .expect_at_least(0)
            .create_async()
            .await;
        // Second submission resolves synchronously.
        server
            .mock("POST", "/import")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"path":"owner/fast"}"#.to_string(),
            ))
            .with_body(r#"{"success":true,"imported":[],"rejected":[]}"#)
            .create_async()
            .await;

        let (mut runner, mut updates) = runner_for(&server);

        let first = runner.submit(SubmitImport::new("owner/slow"));
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = runner.submit(SubmitImport::new("owner/fast"));
        assert_ne!(first, second);

        // The superseding run finishes; the first never does.
        let finished = loop {
            let update = updates.recv().await.expect("runner should emit updates");
            match update {
                ImportUpdate::Finished { submission, result } => break (submission, result),
                ImportUpdate::Progress { submission, .. } => {
                    // Stale progress from the aborted run is identifiable.
                    assert!(submission <= second);
                }
            }
        };
        assert_eq!(finished.0, second);
        assert!(finished.1.unwrap().success);
    }

    #[tokio::test]
    async fn drop_aborts_in_flight_run() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/import")
            .with_body(r#"{"success":true,"job_id":"J1","status":"pending","message":"queued"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/import/jobs/J1")
            .with_body(pending_job_body())
            .expect_at_least(0)
            .create_async()
            .await;

        let (mut runner, mut updates) = runner_for(&server);
        runner.submit(SubmitImport::new("owner/repo"));
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(runner);

        // Both senders are gone once the task is aborted, so the channel
        // closes without a Finished update.
        while let Some(update) = updates.recv().await {
            assert!(matches!(update, ImportUpdate::Progress { .. }));
        }
    }
}
