use anyhow::{Context, Result, bail};
use skillhub_auth::{AuthSession, CallbackParams, Settings};
use std::io::{BufRead, Write};

/// Browser-based login. Opens the provider's login page, then waits for the
/// user to paste the callback URL the browser lands on.
pub async fn login(session: &AuthSession, settings: &Settings, signup: bool) -> Result<()> {
    let callback_url = format!("{}/auth/callback", settings.webapp_url.trim_end_matches('/'));
    let url = if signup {
        session.sign_up_url(&callback_url, None)?
    } else {
        session.sign_in_url(&callback_url, None)?
    };

    println!("Opening your browser to sign in...");
    if open::that(&url).is_err() {
        println!("Could not open a browser. Visit this URL instead:\n\n  {}\n", url);
    }

    print!("Paste the callback URL from your browser: ");
    std::io::stdout().flush()?;
    let mut pasted = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut pasted)
        .context("Failed to read callback URL")?;

    let params = CallbackParams::from_url(pasted.trim())?;
    session.handle_callback(&params).await?;

    match session.state().await.user {
        Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
        None => println!("Signed in"),
    }
    Ok(())
}

pub async fn logout(session: &AuthSession) -> Result<()> {
    if !session.state().await.is_authenticated {
        println!("Not signed in");
        return Ok(());
    }
    session.sign_out().await;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(session: &AuthSession) -> Result<()> {
    let state = session.state().await;
    match state.user {
        Some(user) if state.is_authenticated => {
            println!("{} <{}>", user.name, user.email);
            println!("id: {}", user.id);
            Ok(())
        }
        _ => bail!("Not signed in. Run `skillhub login` first."),
    }
}
