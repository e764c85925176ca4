//! Interactive collection of a [`GenerationRequest`]
//!
//! The flow walks through its states in a fixed order:
//!
//! 1. select the target module (admin, non-core)
//! 2. enter the model name, confirming any camelization
//! 3. enter the API endpoint
//! 4. enter the table name, looping until it exists (`?` lists all tables)
//! 5. confirm i18n
//!
//! A state is skipped when its value was supplied up front in [`Presets`].

use crate::error::{CrudError, Result};
use crate::generator::GenerationRequest;
use crate::naming::NamingHelpers;
use crate::prompt::Prompter;
use crate::registry::{select_module, ModuleFilter, ModuleRegistry};
use crate::schema::SchemaCatalog;

/// Input typed at the table prompt to list every table
pub const LIST_TABLES: &str = "?";

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Presets {
    /// Target module id
    pub module: Option<String>,
    /// Model name, used as given
    pub model: Option<String>,
    /// API endpoint
    pub api_endpoint: Option<String>,
    /// Database table
    pub table: Option<String>,
    /// Enable i18n for string fields
    pub i18n: Option<bool>,
}

/// Prompts for every value of a [`GenerationRequest`] not already preset
pub struct CrudFlow<'a> {
    registry: &'a ModuleRegistry,
    catalog: &'a SchemaCatalog,
}

impl<'a> CrudFlow<'a> {
    /// Create a flow over the configured modules and the database tables
    #[must_use]
    pub const fn new(registry: &'a ModuleRegistry, catalog: &'a SchemaCatalog) -> Self {
        Self { registry, catalog }
    }

    /// Run the flow until the request is complete
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A preset module is not registered, or no module can be selected
    /// - A preset table does not exist
    /// - A prompt fails
    pub fn run(&self, presets: Presets, prompter: &mut dyn Prompter) -> Result<GenerationRequest> {
        let module_name = match presets.module {
            Some(id) => self.registry.require(&id)?.id.clone(),
            None => select_module(self.registry, &ModuleFilter::crud_target(), prompter)?
                .id
                .clone(),
        };
        tracing::debug!(module = %module_name, "module selected");

        let model_name = match presets.model {
            Some(model) => model,
            None => Self::enter_model_name(prompter)?,
        };

        let api_endpoint = match presets.api_endpoint {
            Some(endpoint) => endpoint,
            None => {
                let suggestion = NamingHelpers::suggest_api_endpoint(&module_name, &model_name);
                prompter.input("Api Endpoint:", Some(suggestion.as_str()))?
            }
        };

        let db_table_name = match presets.table {
            Some(table) if self.catalog.contains(&table) => table,
            Some(table) => return Err(CrudError::UnknownTable(table)),
            None => {
                let suggestion = NamingHelpers::suggest_table_name(&module_name, &model_name);
                self.select_table(&suggestion, prompter)?
            }
        };

        let enable_i18n = match presets.i18n {
            Some(enabled) => enabled,
            None => prompter.confirm(
                "Would you like to enable i18n field input for text fields? Only required for multilingual pages.",
                false,
            )?,
        };

        Ok(GenerationRequest {
            module_name,
            model_name,
            api_endpoint,
            db_table_name,
            enable_i18n,
        })
    }

    fn enter_model_name(prompter: &mut dyn Prompter) -> Result<String> {
        loop {
            let entered = prompter.input("Model Name (e.g. Album):", None)?;
            let camelized = NamingHelpers::camelize(&entered);
            if camelized == entered {
                return Ok(entered);
            }

            let question = format!(
                "We have camelized the model name to '{camelized}' do you want to continue with this name?"
            );
            if prompter.confirm(&question, true)? {
                return Ok(camelized);
            }
        }
    }

    fn select_table(&self, suggestion: &str, prompter: &mut dyn Prompter) -> Result<String> {
        loop {
            let table = prompter.input("Database Table name for the Model:", Some(suggestion))?;

            if table == LIST_TABLES {
                for name in self.catalog.table_names() {
                    prompter.info(&format!("- {name}"));
                }
                continue;
            }

            if self.catalog.contains(&table) {
                return Ok(table);
            }

            tracing::debug!(table = %table, "rejected unknown table");
            prompter.error(&format!(
                "The selected database table '{table}' does not exist in the list of tables. Type '{LIST_TABLES}' to see all tables."
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_catalog, sample_registry, Answer, ScriptedPrompter};

    fn run(presets: Presets, answers: Vec<Answer>) -> (Result<GenerationRequest>, ScriptedPrompter) {
        let registry = sample_registry();
        let catalog = sample_catalog();
        let mut prompter = ScriptedPrompter::new(answers);
        let result = CrudFlow::new(&registry, &catalog).run(presets, &mut prompter);
        (result, prompter)
    }

    #[test]
    fn test_full_interactive_run_with_defaults() {
        let (result, prompter) = run(
            Presets::default(),
            vec![
                Answer::Select(0),
                Answer::input("NavItem"),
                Answer::input(""),
                Answer::input(""),
                Answer::Confirm(true),
            ],
        );

        let request = result.unwrap();
        assert_eq!(
            request,
            GenerationRequest {
                module_name: "cmsadmin".to_string(),
                model_name: "NavItem".to_string(),
                api_endpoint: "api-cms-navitem".to_string(),
                db_table_name: "cms_navitem".to_string(),
                enable_i18n: true,
            }
        );
        assert_eq!(prompter.remaining(), 0);
        assert!(prompter.errors().is_empty());
    }

    #[test]
    fn test_camelized_model_name_confirmed() {
        let (result, prompter) = run(
            Presets {
                module: Some("cmsadmin".to_string()),
                api_endpoint: Some("api-cms-navitem".to_string()),
                table: Some("cms_navitem".to_string()),
                i18n: Some(false),
                ..Presets::default()
            },
            vec![Answer::input("nav_item"), Answer::Confirm(true)],
        );

        assert_eq!(result.unwrap().model_name, "NavItem");
        assert_eq!(
            prompter.prompts()[1],
            "We have camelized the model name to 'NavItem' do you want to continue with this name?"
        );
    }

    #[test]
    fn test_declined_camelization_prompts_again() {
        let (result, prompter) = run(
            Presets {
                module: Some("cmsadmin".to_string()),
                api_endpoint: Some("api-cms-navitem".to_string()),
                table: Some("cms_navitem".to_string()),
                i18n: Some(false),
                ..Presets::default()
            },
            vec![
                Answer::input("nav_item"),
                Answer::Confirm(false),
                Answer::input("Navitem"),
            ],
        );

        assert_eq!(result.unwrap().model_name, "Navitem");
        assert_eq!(prompter.prompts().len(), 3);
    }

    #[test]
    fn test_table_loop_rejects_unknown_then_accepts() {
        let (result, prompter) = run(
            Presets {
                module: Some("galleryadmin".to_string()),
                model: Some("Cover".to_string()),
                i18n: Some(false),
                ..Presets::default()
            },
            vec![
                Answer::input(""),
                Answer::input(""),
                Answer::input("albums"),
                Answer::input("gallery_album"),
                Answer::input("cms_navitem"),
            ],
        );

        let request = result.unwrap();
        assert_eq!(request.api_endpoint, "api-gallery-cover");
        assert_eq!(request.db_table_name, "gallery_album");
        assert_eq!(prompter.errors().len(), 2);
        assert!(prompter.errors()[0].contains("'gallery_cover'"));
        assert!(prompter.errors()[1].contains("'albums'"));
        // Accepted on the first valid name
        assert_eq!(prompter.remaining(), 1);
    }

    #[test]
    fn test_table_loop_lists_and_reports() {
        let (result, prompter) = run(
            Presets {
                module: Some("cmsadmin".to_string()),
                model: Some("Page".to_string()),
                api_endpoint: Some("api-cms-page".to_string()),
                i18n: Some(false),
                ..Presets::default()
            },
            vec![
                Answer::input(""),
                Answer::input("?"),
                Answer::input("cms_navitem"),
            ],
        );

        assert_eq!(result.unwrap().db_table_name, "cms_navitem");
        assert_eq!(prompter.infos(), ["- cms_navitem", "- gallery_album"]);
        assert_eq!(
            prompter.errors(),
            ["The selected database table 'cms_page' does not exist in the list of tables. Type '?' to see all tables."]
        );
    }

    #[test]
    fn test_presets_skip_every_prompt() {
        let (result, prompter) = run(
            Presets {
                module: Some("cmsadmin".to_string()),
                model: Some("NavItem".to_string()),
                api_endpoint: Some("api-custom".to_string()),
                table: Some("cms_navitem".to_string()),
                i18n: Some(true),
            },
            vec![],
        );

        assert_eq!(result.unwrap().api_endpoint, "api-custom");
        assert!(prompter.prompts().is_empty());
    }

    #[test]
    fn test_unknown_preset_module() {
        let (result, _) = run(
            Presets {
                module: Some("shop".to_string()),
                ..Presets::default()
            },
            vec![],
        );
        assert!(matches!(result, Err(CrudError::UnknownModule(_))));
    }

    #[test]
    fn test_unknown_preset_table() {
        let (result, _) = run(
            Presets {
                module: Some("cmsadmin".to_string()),
                model: Some("NavItem".to_string()),
                api_endpoint: Some("api-cms-navitem".to_string()),
                table: Some("missing".to_string()),
                ..Presets::default()
            },
            vec![],
        );
        assert!(matches!(result, Err(CrudError::UnknownTable(t)) if t == "missing"));
    }
}
