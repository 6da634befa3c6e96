//! Login, logout, and whoami.

use voltra_core::{CoreError, Session, validate_email};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::error::CliError;
use crate::output::{print_feedback, should_color};

use super::util;

pub async fn login(args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = should_color(&global.color);

    // A stored session short-circuits, like the original login page
    // bouncing straight to the dashboard.
    if !args.force && voltra_config::load_session().is_some() {
        print_feedback(
            "already logged in (use --force to switch accounts)",
            global.quiet,
            color,
        );
        return Ok(());
    }

    let email = match args.email {
        Some(email) => email,
        None => dialoguer::Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| CliError::Io(std::io::Error::other(e)))?,
    };
    validate_email(&email)?;

    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")?,
    };
    if password.trim().is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "is required".into(),
        });
    }

    let cfg = util::effective_config(global);
    let client = util::anonymous_client(&cfg)?;

    let response = client
        .login(email.trim(), password.trim())
        .await
        .map_err(|e| match CoreError::from(e) {
            // 401 on login: wrong credentials, nothing stored, no redirect.
            CoreError::RequestFailed { status: 401, .. } => CliError::InvalidCredentials,
            other => CliError::from(other),
        })?;

    let session = Session::from(response);
    voltra_config::save_session(&session)?;

    print_feedback(
        &format!("Logged in as {}", session.display_name()),
        global.quiet,
        color,
    );
    Ok(())
}

pub fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    voltra_config::clear_session();
    print_feedback("Logged out", global.quiet, should_color(&global.color));
    Ok(())
}

pub fn whoami(global: &GlobalOpts) -> Result<(), CliError> {
    let session = voltra_config::load_session().ok_or(CliError::NoSession)?;
    if !global.quiet {
        println!("{}", session.display_name());
        println!("avatar: {}", session.avatar_or_placeholder());
        println!("since:  {}", session.created_at.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}
