mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, delete, find, move_element, rename, search, show, ApplyArgs, DeleteArgs, FindArgs, MoveArgs,
    RenameArgs, SearchArgs, ShowArgs,
};
use config::Config;

/// uimap - inspect and restructure UI map files
#[derive(Parser, Debug)]
#[command(name = "uimap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the element tree
    Show(ShowArgs),

    /// Describe the element at a path
    Find(FindArgs),

    /// Move an element under a new parent, merging with a namesake
    Move(MoveArgs),

    /// Delete elements and the actions bound to them
    Delete(DeleteArgs),

    /// Give an element a new id
    Rename(RenameArgs),

    /// Find the next element whose id contains some text
    Search(SearchArgs),

    /// Apply a JSON list of mutations
    Apply(ApplyArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd)?;

    match cli.command {
        Command::Show(args) => show(args),
        Command::Find(args) => find(args),
        Command::Move(args) => move_element(args, &config),
        Command::Delete(args) => delete(args, &config),
        Command::Rename(args) => rename(args, &config),
        Command::Search(args) => search(args),
        Command::Apply(args) => apply(args, &config),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
