//! Password recovery and reset flows.

use voltra_core::{
    CoreError, PasswordStrength, password_strength, validate_email, validate_new_password,
};

use crate::cli::{GlobalOpts, PasswordArgs, PasswordCommand};
use crate::error::CliError;
use crate::output::{print_feedback, should_color};

use super::util;

pub async fn handle(args: PasswordArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = should_color(&global.color);
    let cfg = util::effective_config(global);
    let client = util::anonymous_client(&cfg)?;

    match args.command {
        PasswordCommand::Recover { email } => {
            validate_email(&email)?;
            let message = client
                .recover_password(email.trim())
                .await
                .map_err(|e| CliError::from(CoreError::from(e)))?;
            // The server's own message, for both outcomes.
            print_feedback(&message, global.quiet, color);
            Ok(())
        }

        PasswordCommand::Reset { token, password } => {
            if token.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "is required -- use the link from the recovery email".into(),
                });
            }

            let password = match password {
                Some(password) => password,
                None => rpassword::prompt_password("New password: ")?,
            };
            validate_new_password(&password)?;

            let strength = match password_strength(&password) {
                PasswordStrength::Weak => "weak",
                PasswordStrength::Medium => "medium",
                PasswordStrength::Strong => "strong",
            };
            tracing::debug!(strength, "password accepted");

            let message = client
                .reset_password(token.trim(), &password)
                .await
                .map_err(|e| CliError::from(CoreError::from(e)))?;
            print_feedback(&message, global.quiet, color);
            Ok(())
        }
    }
}
