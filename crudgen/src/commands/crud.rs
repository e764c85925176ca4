//! `crudgen crud` - generate API, controller and model for a table

use anyhow::{bail, Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::CrudgenConfig;
use crate::emitter::{self, WriteOutcome};
use crate::error::CrudError;
use crate::flow::{CrudFlow, Presets};
use crate::generator::CrudGenerator;
use crate::prompt::TerminalPrompter;
use crate::schema::{introspect, SchemaCatalog};

/// Create an NgRest CRUD (API, controller and model) for an existing table
///
/// Every value not given as an option is asked for interactively.
///
/// Examples:
///   crudgen crud
///   crudgen crud --module cmsadmin --model `NavItem` --table `cms_navitem` --no-i18n
#[derive(Debug, clap::Args)]
pub struct CrudCommand {
    /// Module the files are written into (e.g. `cmsadmin`)
    #[arg(long)]
    pub module: Option<String>,

    /// Model name (e.g. `NavItem`)
    #[arg(long)]
    pub model: Option<String>,

    /// API endpoint (e.g. `api-cms-navitem`)
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Database table backing the model
    #[arg(long)]
    pub table: Option<String>,

    /// Declare string fields as i18n attributes
    #[arg(long, conflicts_with = "no_i18n")]
    pub i18n: bool,

    /// Do not declare i18n attributes
    #[arg(long)]
    pub no_i18n: bool,

    /// Configuration file (default: ./crudgen.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Database URL, overrides the configured one
    #[arg(long)]
    pub database_url: Option<String>,
}

impl CrudCommand {
    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration cannot be loaded or has no database URL
    /// - The database schema cannot be read
    /// - A prompt fails or no module can be selected
    /// - A template fails to render
    pub fn execute(self) -> Result<()> {
        let config = CrudgenConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?
            .with_database_url(self.database_url.clone());
        let registry = config.registry();
        let catalog = fetch_catalog(config.require_database_url()?)?;

        let mut prompter = TerminalPrompter::new();
        let request = CrudFlow::new(&registry, &catalog).run(self.presets(), &mut prompter)?;
        tracing::info!(?request, "generation request complete");

        let module = registry.require(&request.module_name)?;
        let table = catalog
            .table(&request.db_table_name)
            .ok_or_else(|| CrudError::UnknownTable(request.db_table_name.clone()))?;

        let crud = CrudGenerator::new()?
            .generate(module, &request, table)
            .context("Failed to render CRUD files")?;

        let outcomes = emitter::emit(&crud.files, &mut prompter)?;

        println!();
        println!("{}", style(&crud.summary).green());

        let failed = outcomes
            .iter()
            .filter(|o| matches!(o, WriteOutcome::Failed(_)))
            .count();
        if failed > 0 {
            println!(
                "{}",
                style(format!("{failed} of {} files could not be written", outcomes.len()))
                    .yellow()
                    .bold()
            );
        }

        Ok(())
    }

    fn presets(&self) -> Presets {
        Presets {
            module: self.module.clone(),
            model: self.model.clone(),
            api_endpoint: self.api_endpoint.clone(),
            table: self.table.clone(),
            i18n: self.i18n_flag(),
        }
    }

    const fn i18n_flag(&self) -> Option<bool> {
        if self.i18n {
            Some(true)
        } else if self.no_i18n {
            Some(false)
        } else {
            None
        }
    }
}

/// Read the database schema once, before any prompt is shown
fn fetch_catalog(database_url: &str) -> Result<SchemaCatalog> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Failed to set progress style")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Reading database schema...");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let catalog = runtime.block_on(introspect::load_catalog(database_url));

    spinner.finish_and_clear();

    let catalog = catalog.context("Failed to read the database schema")?;
    if catalog.is_empty() {
        bail!("The database has no tables to generate a CRUD for");
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        crud: CrudCommand,
    }

    fn parse(args: &[&str]) -> CrudCommand {
        Harness::parse_from(std::iter::once("crudgen").chain(args.iter().copied())).crud
    }

    #[test]
    fn test_presets_from_flags() {
        let cmd = parse(&[
            "--module",
            "cmsadmin",
            "--model",
            "NavItem",
            "--api-endpoint",
            "api-cms-navitem",
            "--table",
            "cms_navitem",
            "--i18n",
        ]);
        let presets = cmd.presets();
        assert_eq!(presets.module.as_deref(), Some("cmsadmin"));
        assert_eq!(presets.model.as_deref(), Some("NavItem"));
        assert_eq!(presets.api_endpoint.as_deref(), Some("api-cms-navitem"));
        assert_eq!(presets.table.as_deref(), Some("cms_navitem"));
        assert_eq!(presets.i18n, Some(true));
    }

    #[test]
    fn test_i18n_tri_state() {
        assert_eq!(parse(&[]).presets().i18n, None);
        assert_eq!(parse(&["--no-i18n"]).presets().i18n, Some(false));
        assert!(Harness::try_parse_from(["crudgen", "--i18n", "--no-i18n"]).is_err());
    }
}
