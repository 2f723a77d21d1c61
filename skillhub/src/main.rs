use anyhow::Result;
use clap::Parser;
use skillhub_api::Client;
use skillhub_auth::{AuthSession, CredentialStore, SessionClient, Settings};
use std::sync::Arc;

use crate::cli::{Cli, Command};

mod cli;
mod commands;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = logging::init_logging()?;
    tracing::debug!("Logging to {}", log_path.display());

    let settings = Settings::new()?;
    settings.validate().map_err(anyhow::Error::msg)?;

    let store = CredentialStore::new()?;
    let session_client = SessionClient::new(settings.auth_url.clone(), settings.webapp_url.clone());
    let session = AuthSession::new(store, session_client);
    session.initialize().await;

    let client = Arc::new(Client::new(settings.api_url.clone()));
    if let Some(token) = session.state().await.access_token {
        client.set_access_token(Some(token));
    }

    match cli.command {
        Command::Login { signup } => commands::auth::login(&session, &settings, signup).await,
        Command::Logout => commands::auth::logout(&session).await,
        Command::Whoami => commands::auth::whoami(&session).await,
        Command::Skills(command) => commands::skills::run(&client, &session, command).await,
        Command::Files { skill, path } => commands::files::run(&client, skill.as_str(), path).await,
        Command::Import { url, private } => {
            commands::import::run(client.clone(), &session, &url, private).await
        }
    }
}
