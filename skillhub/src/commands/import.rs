use anyhow::{Result, bail};
use skillhub_api::endpoints::import::ImportJobStatus;
use skillhub_api::{Client, ImportPoller, Request};
use skillhub_auth::AuthSession;
use std::sync::Arc;

/// Submit a repository for import and follow it to completion, printing each
/// status transition as the job moves through the queue.
pub async fn run(
    client: Arc<Client>,
    session: &AuthSession,
    url: &str,
    private: bool,
) -> Result<()> {
    if !session.state().await.is_authenticated {
        bail!("Not signed in. Run `skillhub login` first.");
    }

    println!("Importing {}...", url);

    let mut request = Request::import().submit(url);
    if private {
        request = request.is_private(true);
    }

    let mut last_status: Option<ImportJobStatus> = None;
    let report = ImportPoller::new(client)
        .run_with(request, |job| {
            if last_status != Some(job.status) {
                last_status = Some(job.status);
                match job.status {
                    ImportJobStatus::Pending => println!("Waiting in the import queue..."),
                    ImportJobStatus::Processing => println!("Scanning repository for skills..."),
                    ImportJobStatus::Completed | ImportJobStatus::Failed => {}
                }
            }
        })
        .await?;

    if report.imported.is_empty() && report.rejected.is_empty() {
        println!("No skills found in the repository");
        return Ok(());
    }

    if !report.imported.is_empty() {
        println!("\nImported {} skill(s):", report.imported.len());
        for result in &report.imported {
            println!("  {} ({})", result.full_id, result.name);
        }
    }
    if !report.rejected.is_empty() {
        println!("\nSkipped {} candidate(s):", report.rejected.len());
        for rejection in &report.rejected {
            println!("  {}: {}", rejection.path, rejection.reason);
        }
    }
    Ok(())
}
