//! Scribble CLI - drive the rich-text note editor from the command line
//!
//! Replays edit scripts against note fields, prints and exports notes, and
//! renders voice memo waveforms.

mod cli;
mod commands;
mod config_store;
mod error;
#[cfg(test)]
mod tests;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::edit::{run_edit, EditOptions};
use crate::commands::export::run_export;
use crate::commands::show::run_show;
use crate::commands::waveform::run_waveform;
use crate::config_store::{load_settings, resolve_config_path};
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scribble=info,scribble_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config.as_deref())?;

    match cli.command {
        Commands::Edit {
            note,
            script,
            field,
            create,
            title,
            json,
        } => {
            let settings = load_settings(&config_path)?;
            let options = EditOptions {
                field,
                create,
                title,
                json,
            };
            run_edit(&note, &script, &options, &settings)?;
        }
        Commands::Show { note, markdown } => run_show(&note, markdown)?,
        Commands::Export {
            notes,
            format,
            output,
        } => run_export(&notes, format, output.as_deref())?,
        Commands::Waveform { path, bars, json } => run_waveform(&path, bars, json)?,
        Commands::Config { command } => run_config(command, &config_path)?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
    }

    Ok(())
}
