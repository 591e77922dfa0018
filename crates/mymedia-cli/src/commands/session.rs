use anyhow::{Result, bail};
use mymedia_application::LoginOutcome;
use mymedia_core::auth::{Session, SessionState};

use super::{AppContext, Output};

fn describe(session: &Session) -> String {
    match session.state() {
        SessionState::Anonymous => "Not logged in".to_string(),
        SessionState::Restored => "Logged in (restored token, profile not loaded)".to_string(),
        SessionState::Authenticated => match &session.user {
            Some(user) => format!(
                "Logged in as {} <{}> ({:?}, language {})",
                user.username, user.email, user.user_type, user.language
            ),
            None => "Logged in".to_string(),
        },
    }
}

pub fn status(app: &AppContext, output: Output) -> Result<()> {
    let session = app.session.snapshot();
    output.emit(&session, || describe(&session))
}

pub async fn login(app: &AppContext, output: Output, email: &str, password: &str) -> Result<()> {
    let outcome = app.session.login(email, password).await;
    output.emit(&outcome, || match &outcome {
        LoginOutcome::Success(response) => format!(
            "{} - welcome {} (language: {})",
            response.message,
            response.user.username,
            app.session.language()
        ),
        LoginOutcome::Failure(failure) if failure.is_rejected() => {
            format!("Login rejected: {}", failure.message())
        }
        LoginOutcome::Failure(failure) => format!("Login failed: {}", failure.message()),
        LoginOutcome::Ignored => "A login is already in progress".to_string(),
    })?;

    if !outcome.is_success() {
        bail!("login did not succeed");
    }
    Ok(())
}

pub async fn logout(app: &AppContext, output: Output) -> Result<()> {
    app.session.logout().await?;
    let session = app.session.snapshot();
    output.emit(&session, || "Logged out".to_string())
}

pub async fn install_token(app: &AppContext, output: Output, token: &str) -> Result<()> {
    app.session.install_token(token).await?;
    let session = app.session.snapshot();
    output.emit(&session, || describe(&session))
}
