//! `crudgen modules` - list configured modules of one type

use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;

use crate::config::CrudgenConfig;
use crate::prompt::TerminalPrompter;
use crate::registry::{select_module_type, Module, ModuleType};

/// List the configured modules of a type
///
/// Without `--type` the type is asked for interactively.
#[derive(Debug, clap::Args)]
pub struct ModulesCommand {
    /// Module type to list
    #[arg(long = "type", value_enum)]
    pub module_type: Option<ModuleType>,

    /// Hide modules shipped with the framework
    #[arg(long)]
    pub hide_core: bool,

    /// Configuration file (default: ./crudgen.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ModulesCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the type
    /// prompt fails.
    pub fn execute(self) -> Result<()> {
        let config = CrudgenConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?;
        let registry = config.registry();

        let module_type = match self.module_type {
            Some(module_type) => module_type,
            None => select_module_type(&mut TerminalPrompter::new())?,
        };

        let modules = registry.of_type(module_type, self.hide_core);
        println!(
            "{} {}",
            style(format!("{} modules:", module_type.id())).bold(),
            style(modules.len()).cyan()
        );
        for line in listing(&modules) {
            println!("  {line}");
        }

        Ok(())
    }
}

fn listing(modules: &[&Module]) -> Vec<String> {
    modules
        .iter()
        .map(|m| {
            let core = if m.core { " (core)" } else { "" };
            format!("{}{core}  {}", m.id, m.base_path)
        })
        .collect()
}
