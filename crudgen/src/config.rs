//! Configuration management for crudgen
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Command line flags (applied by the caller after loading)
//! 2. Environment variables (`CRUDGEN_` prefix, `__` for nesting)
//! 3. `./crudgen.toml`, or the file passed with `--config`
//! 4. `~/.config/crudgen/config.toml` (user config, XDG)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # crudgen.toml
//! database_url = "sqlite://./app.db"
//!
//! [[modules]]
//! id = "cmsadmin"
//! base_path = "modules/cmsadmin"
//! namespace = "app\\modules\\cmsadmin"
//! admin = true
//! core = false
//! ```

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CrudError, Result};
use crate::registry::{Module, ModuleRegistry};

/// Name of the project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = "crudgen.toml";

/// Complete crudgen configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudgenConfig {
    /// Connection URL of the database whose tables are introspected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Modules CRUD files can be generated into
    pub modules: Vec<Module>,
}

impl CrudgenConfig {
    /// Load configuration from the standard locations
    ///
    /// When `path` is given it replaces `./crudgen.toml` and must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicitly requested configuration file does not exist
    /// - A configuration file contains invalid TOML
    /// - Configuration values fail type conversion
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(&Self::defaults_toml()?));

        let user_config = Self::recommended_path();
        if user_config.exists() {
            tracing::debug!(path = %user_config.display(), "merging user configuration");
            figment = figment.merge(Toml::file(&user_config));
        }

        match path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(CrudError::Config(format!(
                        "configuration file not found: {}",
                        explicit.display()
                    )));
                }
                tracing::debug!(path = %explicit.display(), "merging explicit configuration");
                figment = figment.merge(Toml::file(explicit));
            }
            None => {
                let local = PathBuf::from(LOCAL_CONFIG_FILE);
                if local.exists() {
                    tracing::debug!(path = %local.display(), "merging local configuration");
                    figment = figment.merge(Toml::file(local));
                }
            }
        }

        figment = figment.merge(Env::prefixed("CRUDGEN_").split("__").lowercase(true));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the recommended XDG config path
    ///
    /// Returns `~/.config/crudgen/config.toml` on Linux.
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(LOCAL_CONFIG_FILE),
            |config_dir| config_dir.join("crudgen").join("config.toml"),
        )
    }

    /// Replace the database URL when one was given on the command line
    #[must_use]
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        if url.is_some() {
            self.database_url = url;
        }
        self
    }

    /// The configured database URL
    ///
    /// # Errors
    ///
    /// Returns an error if no URL was configured anywhere.
    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url.as_deref().ok_or_else(|| {
            CrudError::Config(
                "no database_url configured (set it in crudgen.toml, CRUDGEN_DATABASE_URL or --database-url)"
                    .to_string(),
            )
        })
    }

    /// Build the read-only module registry from the configured modules
    #[must_use]
    pub fn registry(&self) -> ModuleRegistry {
        ModuleRegistry::new(self.modules.clone())
    }

    fn defaults_toml() -> Result<String> {
        toml::to_string(&Self::default()).map_err(|e| CrudError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        for (idx, module) in self.modules.iter().enumerate() {
            if module.id.trim().is_empty() {
                return Err(CrudError::Config(format!("modules[{idx}] has an empty id")));
            }
            if self.modules[..idx].iter().any(|m| m.id == module.id) {
                return Err(CrudError::Config(format!(
                    "module '{}' is configured more than once",
                    module.id
                )));
            }
        }
        Ok(())
    }
}
