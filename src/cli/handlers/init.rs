use crate::config::CONFIG_FILE;
use crate::error::LibraryError;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub fn handle_init(ctx: CommandContext) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE);

    if config_path.exists() {
        return Err(LibraryError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    let uri = ctx.config.database_uri(&cwd)?;
    if let Some(dir) = uri.data_dir() {
        std::fs::create_dir_all(dir)?;
    }

    ctx.config.save(&config_path)?;

    println!("{} library catalog in {}", "Initialized".green(), cwd.display());
    println!("  Config:   {}", config_path.display());
    println!("  Database: {}", uri);

    Ok(())
}
