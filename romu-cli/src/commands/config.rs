use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romu_lib::settings::settings_path;

use crate::{CliContext, CliError};

fn show_optional(label: &str, value: Option<&PathBuf>) {
    match value {
        Some(p) => log::info!("  {}: {}", label, p.display().if_supports_color(Stdout, |t| t.cyan())),
        None => log::info!("  {}: {}", label, "(not set)".if_supports_color(Stdout, |t| t.dimmed())),
    }
}

/// Show current settings and the resolved catalog path.
pub(crate) fn run_config_show(ctx: &CliContext) -> Result<(), CliError> {
    let path = settings_path();
    let status = if path.exists() { "(exists)" } else { "(not found)" };
    log::info!("{}", "romu Configuration".if_supports_color(Stdout, |t| t.bold()));
    crate::log_blank();
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status.if_supports_color(Stdout, |t| t.dimmed()),
    );
    show_optional("library.database", ctx.settings.library.database.as_ref());
    show_optional("library.gamedb_dir", ctx.settings.library.gamedb_dir.as_ref());
    crate::log_blank();
    log::info!(
        "  Catalog in use: {}",
        ctx.db_path().display().if_supports_color(Stdout, |t| t.bold())
    );
    Ok(())
}

pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings_path().display());
    Ok(())
}

fn save(settings: &romu_lib::Settings) -> Result<(), CliError> {
    settings
        .save()
        .map_err(|e| CliError::config(format!("Failed to save settings: {}", e)))?;
    log::info!(
        "{} {}",
        "Saved".if_supports_color(Stdout, |t| t.green()),
        settings_path().display()
    );
    Ok(())
}

fn absolute(path: PathBuf) -> Result<PathBuf, CliError> {
    Ok(std::path::absolute(path)?)
}

pub(crate) fn run_config_set_db(ctx: &CliContext, path: PathBuf) -> Result<(), CliError> {
    let mut settings = ctx.settings.clone();
    settings.library.database = Some(absolute(path)?);
    save(&settings)
}

pub(crate) fn run_config_set_gamedb(ctx: &CliContext, path: PathBuf) -> Result<(), CliError> {
    let path = absolute(path)?;
    if !path.is_dir() {
        return Err(CliError::config(format!("Not a directory: {}", path.display())));
    }
    let mut settings = ctx.settings.clone();
    settings.library.gamedb_dir = Some(path);
    save(&settings)
}
