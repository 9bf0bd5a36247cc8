//! migrate-scaffold — create migration files
//!
//! # Usage
//!
//! ```bash
//! # Plain JS migration
//! migrate-scaffold create-users
//!
//! # Loader template with up/down SQL files
//! migrate-scaffold create-users --sql-file
//!
//! # Nested name inside a mode directory
//! migrate-scaffold auth/users/ --mode dev
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::*;
use migrate_scaffold::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "migrate-scaffold")]
#[command(version)]
#[command(about = "Create timestamped database migration files", long_about = None)]
#[command(after_help = "EXAMPLES:
    migrate-scaffold create-users
    migrate-scaffold create-users --sql-file --ignore-on-init
    migrate-scaffold auth/users/ --mode dev --coffee-file")]
struct Cli {
    /// Migration name; a nested name like `auth/users/` creates folders
    name: Option<String>,

    /// Base directory for migrations
    #[arg(long = "migrations-dir", env = "MIGRATIONS_DIR")]
    migrations_dir: Option<PathBuf>,

    /// Named migration group, placed in a sub-directory (`all` for none)
    #[arg(long)]
    mode: Option<String>,

    /// Generate a loader migration with up/down SQL files
    #[arg(long = "sql-file")]
    sql_file: bool,

    /// Generate a CoffeeScript migration
    #[arg(long = "coffee-file")]
    coffee_file: bool,

    /// Loader migration skips `up` when the runner starts with ignore-on-init
    #[arg(long = "ignore-on-init")]
    ignore_on_init: bool,

    /// Config file (`.json` or `.toml`)
    #[arg(short, long, env = "MIGRATE_SCAFFOLD_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            migrations_dir: self.migrations_dir.clone(),
            mode: self.mode.clone(),
            sql_file: self.sql_file,
            coffee_file: self.coffee_file,
            ignore_on_init: self.ignore_on_init,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        tracing::debug!("{:#}", e);
        eprintln!("{} {}", "Error:".red().bold(), e);

        if matches!(e.downcast_ref::<ScaffoldError>(), Some(ScaffoldError::EmptyName)) {
            eprintln!();
            let _ = Cli::command().print_help();
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "migrate_scaffold=debug"
    } else {
        "migrate_scaffold=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let name = match cli.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ScaffoldError::EmptyName.into()),
    };

    let (file_config, config_path) = FileConfig::discover(cli.config.as_deref())?;
    if let (true, Some(path)) = (cli.verbose, &config_path) {
        println!("{} {}", "Config:".dimmed(), path.display());
    }

    let settings = Settings::resolve(&cli.overrides(), &file_config);
    let request = settings.request(name);

    println!("{}", "📝 Creating Migration".cyan().bold());
    println!();

    let artifacts = Scaffolder::fs().create_with(&request, |artifact| {
        println!("  {} {}", "✓ Created:".green(), artifact.path().display());
    })?;

    if let Some(Artifact {
        template: Template::Migration(variant),
        ..
    }) = artifacts.first()
    {
        println!();
        println!("  Template: {}", variant.to_string().cyan());
    }

    Ok(())
}
