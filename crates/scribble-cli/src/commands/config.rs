use std::path::Path;

use crate::cli::ConfigCommands;
use crate::config_store::{load_settings, save_settings};
use crate::error::CliError;

pub fn run_config(command: ConfigCommands, config_path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(config_path)?;
            println!("Config: {}", config_path.display());
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigCommands::Init {
            font_family,
            history_limit,
            coalesce_window_ms,
            default_bullet,
        } => {
            let mut settings = load_settings(config_path)?;
            if let Some(font_family) = font_family {
                settings.font_family = font_family;
            }
            if let Some(history_limit) = history_limit {
                settings.history_limit = history_limit;
            }
            if let Some(coalesce_window_ms) = coalesce_window_ms {
                settings.coalesce_window_ms = coalesce_window_ms;
            }
            if let Some(default_bullet) = default_bullet {
                settings.default_bullet = default_bullet.into();
            }

            save_settings(&settings, config_path)?;
            tracing::info!(path = %config_path.display(), "Saved editor settings");
            println!("{}", config_path.display());
        }
    }

    Ok(())
}
