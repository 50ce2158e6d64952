pub mod edit;
pub mod show;

pub use edit::{apply, delete, move_element, rename, ApplyArgs, DeleteArgs, MoveArgs, RenameArgs};
pub use show::{find, search, show, FindArgs, SearchArgs, ShowArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use uimap_editor::Document;
use uimap_model::JsonCodec;

use crate::config::Config;

pub(crate) fn open(file: &Path) -> Result<Document> {
    Document::load(file, &JsonCodec::new())
        .with_context(|| format!("Failed to load {}", file.display()))
}

/// Save with the configured backup policy if anything changed
pub(crate) fn save(doc: &mut Document, config: &Config) -> Result<()> {
    if !doc.is_modified() {
        println!("   {}", "Nothing changed".dimmed());
        return Ok(());
    }

    let backup = doc.save_with_backup(&JsonCodec::new(), &config.backup_policy())?;
    if let Some(path) = doc.path.as_ref() {
        println!("   {} {}", "Saved".green(), path.display());
    }
    if let Some(backup) = backup {
        println!("   {} {}", "Backup".dimmed(), backup.display());
    }
    Ok(())
}
