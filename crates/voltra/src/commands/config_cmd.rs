//! Config inspection and the theme preference.

use voltra_config::Theme;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, ThemeArg};
use crate::error::CliError;
use crate::output::{print_feedback, print_output, should_color};

use super::util;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = util::effective_config(global);
            let rendered =
                toml::to_string_pretty(&cfg).map_err(|e| CliError::Internal(e.to_string()))?;
            print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            print_output(
                &voltra_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::SetTheme { theme } => {
            let mut cfg = voltra_config::load_config_or_default();
            cfg.theme = match theme {
                ThemeArg::Light => Theme::Light,
                ThemeArg::Dark => Theme::Dark,
            };
            voltra_config::save_config(&cfg)?;
            print_feedback(
                &format!("theme set to {:?}", cfg.theme).to_lowercase(),
                global.quiet,
                should_color(&global.color),
            );
            Ok(())
        }
    }
}
