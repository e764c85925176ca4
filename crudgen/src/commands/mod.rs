//! CLI commands
//!
//! - `crud` - Generate API, controller and model for a database table
//! - `modules` - List configured modules by type

pub mod crud;
pub mod modules;

pub use crud::CrudCommand;
pub use modules::ModulesCommand;
