//! Module registry and interactive module selection
//!
//! The registry is the read-only list of host-framework modules the generator
//! may write into. Selection prompts filter it by capability flags.

use serde::{Deserialize, Serialize};

use crate::error::{CrudError, Result};
use crate::prompt::Prompter;

/// A host-framework module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module id (e.g., `cmsadmin`)
    pub id: String,
    /// Directory holding the module's `apis/`, `controllers/` and `models/`
    pub base_path: String,
    /// Namespace of the module (e.g., `app\modules\cmsadmin`)
    pub namespace: String,
    /// Whether the module is an administration module
    #[serde(default)]
    pub admin: bool,
    /// Whether the module ships with the framework itself
    #[serde(default)]
    pub core: bool,
}

/// Kind of module a user can create or list
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModuleType {
    /// Renders views
    Frontend,
    /// Manages data inside the administration area
    Admin,
}

impl ModuleType {
    const ALL: [Self; 2] = [Self::Frontend, Self::Admin];

    /// Short identifier
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Admin => "admin",
        }
    }

    /// Human description shown in the selection list
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend Modules are mainly used to render views.",
            Self::Admin => "Admin Modules are mainly used when your data management should be done inside the administration area.",
        }
    }
}

/// Options narrowing the modules offered by [`select_module`]
#[derive(Debug, Clone, Default)]
pub struct ModuleFilter {
    /// Offer administration modules only
    pub only_admin: bool,
    /// Hide modules that ship with the framework
    pub hide_core: bool,
    /// Prompt text; defaults to "Please select a module:"
    pub text: Option<String>,
}

impl ModuleFilter {
    /// Filter used when choosing where CRUD files are saved
    #[must_use]
    pub fn crud_target() -> Self {
        Self {
            only_admin: true,
            hide_core: true,
            text: Some("Select the Module where the CRUD files should be saved:".to_string()),
        }
    }

    fn accepts(&self, module: &Module) -> bool {
        if self.only_admin && !module.admin {
            return false;
        }
        if self.hide_core && module.core {
            return false;
        }
        true
    }
}

/// Read-only list of modules, passed explicitly to whoever needs it
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<Module>,
}

impl ModuleRegistry {
    /// Create a registry from configured modules
    #[must_use]
    pub const fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    /// All modules in configuration order
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Look up a module by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Look up a module by id, failing when it is not registered
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::UnknownModule`] if no module has this id.
    pub fn require(&self, id: &str) -> Result<&Module> {
        self.get(id)
            .ok_or_else(|| CrudError::UnknownModule(id.to_string()))
    }

    /// Modules accepted by `filter`, in configuration order
    #[must_use]
    pub fn filtered(&self, filter: &ModuleFilter) -> Vec<&Module> {
        self.modules.iter().filter(|m| filter.accepts(m)).collect()
    }

    /// Modules of the given type
    #[must_use]
    pub fn of_type(&self, module_type: ModuleType, hide_core: bool) -> Vec<&Module> {
        self.modules
            .iter()
            .filter(|m| m.admin == (module_type == ModuleType::Admin))
            .filter(|m| !(hide_core && m.core))
            .collect()
    }
}

/// Ask which kind of module the user is interested in
///
/// # Errors
///
/// Returns an error if the prompt fails.
pub fn select_module_type(prompter: &mut dyn Prompter) -> Result<ModuleType> {
    let items: Vec<String> = ModuleType::ALL
        .iter()
        .map(|t| format!("{} - {}", t.id(), t.description()))
        .collect();
    let index = prompter.select("What kind of Module you want to create?", &items)?;
    ModuleType::ALL
        .get(index)
        .copied()
        .ok_or_else(|| CrudError::Prompt(format!("invalid selection index {index}")))
}

/// Ask the user to pick one of the modules accepted by `filter`
///
/// # Errors
///
/// Returns an error if:
/// - No module matches the filter
/// - The prompt fails
pub fn select_module<'r>(
    registry: &'r ModuleRegistry,
    filter: &ModuleFilter,
    prompter: &mut dyn Prompter,
) -> Result<&'r Module> {
    let candidates = registry.filtered(filter);
    if candidates.is_empty() {
        return Err(CrudError::NoModules(
            "no configured module matches the selection criteria".to_string(),
        ));
    }

    let items: Vec<String> = candidates.iter().map(|m| m.id.clone()).collect();
    let text = filter.text.as_deref().unwrap_or("Please select a module:");
    let index = prompter.select(text, &items)?;

    candidates
        .get(index)
        .copied()
        .ok_or_else(|| CrudError::Prompt(format!("invalid selection index {index}")))
}
