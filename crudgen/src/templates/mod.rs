//! Template rendering for generated files
//!
//! Every template is identified by a [`TemplateId`] whose source is compiled
//! into the binary. [`TemplateRenderer`] registers all of them with a
//! `minijinja` environment up front, so a broken template fails when the
//! renderer is created rather than halfway through a run.

pub mod sources;

use minijinja::{AutoEscape, Environment};
use serde::Serialize;

use crate::error::Result;

/// Templates known to the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    /// API controller (`apis/<Model>Controller.php`)
    Api,
    /// Admin controller (`controllers/<Model>Controller.php`)
    Controller,
    /// NgRest model (`models/<Model>.php`)
    Model,
    /// Summary printed after generation
    BuildSummary,
}

impl TemplateId {
    /// All template ids
    pub const ALL: [Self; 4] = [Self::Api, Self::Controller, Self::Model, Self::BuildSummary];

    /// Name the template is registered under
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Api => "crud/api.php",
            Self::Controller => "crud/controller.php",
            Self::Model => "crud/model.php",
            Self::BuildSummary => "crud/build_summary.txt",
        }
    }

    /// Template source
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::Api => sources::API,
            Self::Controller => sources::CONTROLLER,
            Self::Model => sources::MODEL,
            Self::BuildSummary => sources::BUILD_SUMMARY,
        }
    }
}

/// Renders [`TemplateId`]s with a prepared `minijinja` environment
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Create a renderer with every built-in template registered
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to parse.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        // Output is PHP and plain text, never HTML
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("php_str", php_str);
        env.add_filter("php_list", php_list);

        for id in TemplateId::ALL {
            env.add_template(id.name(), id.source())?;
        }

        Ok(Self { env })
    }

    /// Render a template with the given context
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render<S: Serialize>(&self, id: TemplateId, context: S) -> Result<String> {
        let template = self.env.get_template(id.name())?;
        Ok(template.render(context)?)
    }
}

/// Escape text for the inside of a PHP single-quoted literal
///
/// Only `\'` and `\\` are escapes there, so a backslash is doubled only when
/// it would otherwise combine with the next char or the closing quote.
fn php_str(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => escaped.push_str("\\'"),
            '\\' if matches!(chars.peek(), None | Some('\\' | '\'')) => escaped.push_str("\\\\"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `["a", "b"]` → `'a', 'b'`
fn php_list(items: Vec<String>) -> String {
    items
        .iter()
        .map(|item| format!("'{}'", php_str(item)))
        .collect::<Vec<_>>()
        .join(", ")
}
