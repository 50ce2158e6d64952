use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use uimap_editor::NodeRef;

use super::open;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// UI map file
    pub file: PathBuf,

    /// Also list the recorded actions
    #[arg(short, long)]
    pub actions: bool,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// UI map file
    pub file: PathBuf,

    /// Dotted path of the element (Map.Window.Element...)
    pub path: String,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// UI map file
    pub file: PathBuf,

    /// Text to look for in element ids (case-insensitive)
    pub text: String,

    /// Continue after this path instead of from the top
    #[arg(long)]
    pub after: Option<String>,
}

pub fn show(args: ShowArgs) -> Result<()> {
    let doc = open(&args.file)?;

    for entry in doc.outline() {
        let indent = "  ".repeat(entry.depth);
        let id = match entry.depth {
            0 => entry.id.bright_blue().bold(),
            1 => entry.id.cyan(),
            _ => entry.id.normal(),
        };
        println!("{}{}", indent, id);
    }

    if args.actions {
        println!();
        println!("{}", "Actions".bold());
        for (index, action) in doc.tree().execute_actions.iter().enumerate() {
            let target = match action.ui_object_name.as_deref() {
                Some(name) if !name.is_empty() => {
                    if doc.find(name).is_some() {
                        name.green()
                    } else {
                        name.red()
                    }
                }
                _ => "(unbound)".dimmed(),
            };
            println!("  [{}] {} → {}", index, action.id, target);
        }
    }

    Ok(())
}

pub fn find(args: FindArgs) -> Result<()> {
    let doc = open(&args.file)?;
    let node = doc
        .find(&args.path)
        .ok_or_else(|| anyhow!("Could not find UI object with path '{}'", args.path))?;

    let kind = match node {
        NodeRef::Map(_) => "UIMap",
        NodeRef::TopLevel(_) => "Top level element",
        NodeRef::Element(_) => "Element",
    };
    println!("{} {}", kind.bold(), args.path.bright_blue());

    if let Some(object) = node.as_object() {
        if !object.control_type.is_empty() {
            println!("   Control type: {}", object.control_type);
        }
        for (name, value) in &object.search_properties {
            println!("   {} = {}", name.dimmed(), value);
        }
    }

    let children = node.child_ids();
    println!("   Children: {}", children.len());
    for child in children {
        println!("     {}", child);
    }

    Ok(())
}

pub fn search(args: SearchArgs) -> Result<()> {
    let doc = open(&args.file)?;

    match doc.find_next(args.after.as_deref(), &args.text) {
        Some(path) => println!("{}", path),
        None => println!("{} No more matches for '{}'", "✗".yellow(), args.text),
    }

    Ok(())
}
