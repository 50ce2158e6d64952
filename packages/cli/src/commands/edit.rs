use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use uimap_editor::Mutation;

use super::{open, save};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// UI map file receiving the element
    pub file: PathBuf,

    /// Path of the element to move
    pub source: String,

    /// Path of the new parent (a UIMap id for top level elements)
    pub destination_parent: String,

    /// Take the element from another UI map file
    #[arg(long)]
    pub from: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// UI map file
    pub file: PathBuf,

    /// Paths of the elements to delete
    #[arg(required = true)]
    pub paths: Vec<String>,
}

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// UI map file
    pub file: PathBuf,

    /// Path of the element to rename
    pub path: String,

    /// New element id
    pub new_id: String,
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// UI map file
    pub file: PathBuf,

    /// JSON array of mutations
    pub mutations: PathBuf,

    /// Check every mutation without saving
    #[arg(long)]
    pub dry_run: bool,
}

pub fn move_element(args: MoveArgs, config: &Config) -> Result<()> {
    let mut target = open(&args.file)?;

    let mut source = match &args.from {
        Some(from) if *from != args.file => Some(open(from)?),
        _ => None,
    };

    let change = match source.as_mut() {
        Some(source) => target.move_from(source, &args.source, &args.destination_parent)?,
        None => target.move_element(&args.source, &args.destination_parent)?,
    };

    let verb = if change.merged { "Merged" } else { "Moved" };
    println!(
        "{} {} {} → {}",
        "✓".green(),
        verb,
        args.source,
        change.path.as_deref().unwrap_or(&args.destination_parent)
    );

    // the source only loses the element once the target holds it on disk
    save(&mut target, config)?;
    if let Some(source) = source.as_mut() {
        save(source, config)?;
    }
    Ok(())
}

pub fn delete(args: DeleteArgs, config: &Config) -> Result<()> {
    let mut doc = open(&args.file)?;

    for path in &args.paths {
        if doc.delete(path)?.modified {
            println!("{} Deleted {}", "✓".green(), path);
        } else {
            println!("{} {} not found", "⚠️ ".yellow(), path);
        }
    }

    save(&mut doc, config)
}

pub fn rename(args: RenameArgs, config: &Config) -> Result<()> {
    let mut doc = open(&args.file)?;

    let new_path = doc.rename(&args.path, &args.new_id)?;
    println!("{} Renamed {} → {}", "✓".green(), args.path, new_path);

    save(&mut doc, config)
}

pub fn apply(args: ApplyArgs, config: &Config) -> Result<()> {
    let mut doc = open(&args.file)?;

    let content = fs::read_to_string(&args.mutations)
        .with_context(|| format!("Failed to read {}", args.mutations.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid mutation list in {}", args.mutations.display()))?;
    info!(count = mutations.len(), "Applying mutations");

    for (index, mutation) in mutations.into_iter().enumerate() {
        let target = mutation.target_path().to_string();
        let result = doc
            .apply(mutation)
            .with_context(|| format!("Mutation #{} on '{}' failed", index, target))?;
        println!(
            "{} [{}] {} (version {})",
            "✓".green(),
            index,
            result.path.as_deref().unwrap_or(&target),
            result.version
        );
    }

    if args.dry_run {
        println!("   {}", "Dry run: nothing saved".dimmed());
        return Ok(());
    }

    save(&mut doc, config)
}
