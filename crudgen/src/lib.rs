//! crudgen: interactive NgRest CRUD generator
//!
//! Given a database table and a target module, crudgen introspects the table
//! schema and writes three PHP files into the module:
//!
//! - `apis/<Model>Controller.php` - REST API controller
//! - `controllers/<Model>Controller.php` - admin controller
//! - `models/<Model>.php` - NgRest model with rules, labels and field types
//!
//! # Pipeline
//!
//! 1. [`config`] loads the database URL and the module registry
//! 2. [`schema::introspect`] reads every table once into a [`SchemaCatalog`]
//! 3. [`flow::CrudFlow`] prompts for whatever was not given on the command line
//! 4. [`generator::CrudGenerator`] renders the files from built-in [`templates`]
//! 5. [`emitter::emit`] writes them, asking before overwriting
//!
//! # Example
//!
//! ```rust
//! use crudgen::flow::{CrudFlow, Presets};
//! use crudgen::generator::CrudGenerator;
//! use crudgen::testing::{sample_catalog, sample_registry, ScriptedPrompter};
//!
//! # fn main() -> crudgen::Result<()> {
//! let registry = sample_registry();
//! let catalog = sample_catalog();
//! let presets = Presets {
//!     module: Some("cmsadmin".into()),
//!     model: Some("NavItem".into()),
//!     api_endpoint: Some("api-cms-navitem".into()),
//!     table: Some("cms_navitem".into()),
//!     i18n: Some(false),
//! };
//!
//! let request = CrudFlow::new(&registry, &catalog).run(presets, &mut ScriptedPrompter::default())?;
//! let crud = CrudGenerator::new()?.generate(
//!     registry.require(&request.module_name)?,
//!     &request,
//!     catalog.table(&request.db_table_name).unwrap(),
//! )?;
//! assert_eq!(crud.files.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod emitter;
pub mod error;
pub mod flow;
pub mod generator;
pub mod naming;
pub mod observability;
pub mod prompt;
pub mod registry;
pub mod schema;
pub mod templates;
pub mod testing;

pub use config::CrudgenConfig;
pub use error::{CrudError, Result};
pub use generator::{CrudGenerator, EmittedFile, GenerationRequest};
pub use registry::{Module, ModuleRegistry, ModuleType};
pub use schema::{Column, ColumnType, SchemaCatalog, TableSchema};
