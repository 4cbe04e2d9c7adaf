use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use cookbook::{import_file, init_logging, normalize_name, Entry, ResolveOptions};

#[derive(Parser)]
#[command(name = "cookbook", version, about = "Cookbook of ingredients and recipes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a handwritten entry name
    Parse {
        /// Raw name, e.g. "meatball_-_sub"
        raw: String,
    },

    /// Load a cookbook file and print the summary of one recipe
    Summary {
        /// Recipe name (canonical form)
        name: String,

        /// JSON file holding an array of entries
        #[arg(long, short)]
        cookbook: PathBuf,

        #[command(flatten)]
        resolve: ResolveOptions,
    },

    /// Load a cookbook file and list what was stored
    Check {
        /// JSON file holding an array of entries
        #[arg(long, short)]
        cookbook: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { raw } => run_parse(&raw),
        Commands::Summary {
            name,
            cookbook,
            resolve,
        } => run_summary(&name, &cookbook, &resolve),
        Commands::Check { cookbook } => run_check(&cookbook),
    }
}

fn run_parse(raw: &str) -> Result<ExitCode> {
    match normalize_name(raw) {
        Some(name) => {
            println!("{}", name);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("❌ Invalid recipe name: {:?}", raw);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_summary(name: &str, path: &Path, resolve: &ResolveOptions) -> Result<ExitCode> {
    let cookbook = resolve.cookbook();
    let added = import_file(&cookbook, path)?;
    info!(entries = added, path = ?path, "cookbook loaded");

    let summary = cookbook
        .summarize(name)
        .with_context(|| format!("Cannot summarize '{}'", name))?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(ExitCode::SUCCESS)
}

fn run_check(path: &Path) -> Result<ExitCode> {
    let cookbook = ResolveOptions::default().cookbook();
    let added = import_file(&cookbook, path)?;

    println!("✓ Loaded {} entries from {:?}", added, path);
    for entry in cookbook.entries() {
        match &entry {
            Entry::Ingredient(ingredient) => {
                println!("  🥚 {} (cook time {})", ingredient.name, ingredient.cook_time)
            }
            Entry::Recipe(recipe) => {
                println!("  🍝 {} ({} items)", recipe.name, recipe.required_items.len())
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
