//! crudgen CLI
//!
//! # Usage
//!
//! ```bash
//! # Fully interactive
//! crudgen crud
//!
//! # Skip the prompts that have a value
//! crudgen crud --module cmsadmin --model NavItem --table cms_navitem --no-i18n
//!
//! # List admin modules without the core ones
//! crudgen modules --type admin --hide-core
//! ```

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use crudgen::commands::{CrudCommand, ModulesCommand};

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(version)]
#[command(about = "Generate NgRest API, controller and model files from a database table", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an NgRest CRUD for an existing database table
    Crud(CrudCommand),
    /// List configured modules by type
    Modules(ModulesCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    crudgen::observability::init(cli.verbose)?;

    match cli.command {
        Commands::Crud(command) => command.execute(),
        Commands::Modules(command) => command.execute(),
    }
}
