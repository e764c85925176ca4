//! Testing utilities for driving the generator without a terminal
//!
//! - [`ScriptedPrompter`] - a [`Prompter`] that replays a fixed list of answers
//!   and records every prompt and message
//! - [`sample_registry`] / [`sample_catalog`] - in-memory fixtures
//!
//! # Example
//!
//! ```rust
//! use crudgen::prompt::Prompter;
//! use crudgen::testing::{Answer, ScriptedPrompter};
//!
//! let mut prompter = ScriptedPrompter::new(vec![Answer::Input(String::new())]);
//! let value = prompter.input("Model Name (e.g. Album):", Some("Album")).unwrap();
//! assert_eq!(value, "Album");
//! ```

use std::collections::VecDeque;

use crate::error::{CrudError, Result};
use crate::prompt::Prompter;
use crate::registry::{Module, ModuleRegistry};
use crate::schema::{Column, ColumnType, SchemaCatalog, TableSchema};

/// One scripted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Index picked in a selection list
    Select(usize),
    /// Text typed at an input prompt; empty accepts the default
    Input(String),
    /// Yes/no answer
    Confirm(bool),
}

impl Answer {
    /// Shorthand for [`Answer::Input`]
    pub fn input(value: impl Into<String>) -> Self {
        Self::Input(value.into())
    }
}

/// Prompter replaying scripted answers in order
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    prompts: Vec<String>,
    infos: Vec<String>,
    successes: Vec<String>,
    errors: Vec<String>,
}

impl ScriptedPrompter {
    /// Create a prompter answering with `answers`
    #[must_use]
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    /// Every prompt text shown so far
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Informational messages
    #[must_use]
    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    /// Success messages
    #[must_use]
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Error messages
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Answers not consumed yet
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<Answer> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| CrudError::Prompt(format!("no scripted answer for '{prompt}'")))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        match self.next(prompt)? {
            Answer::Select(index) if index < items.len() => Ok(index),
            Answer::Select(index) => Err(CrudError::Prompt(format!(
                "scripted index {index} out of range for '{prompt}'"
            ))),
            other => Err(CrudError::Prompt(format!(
                "expected a selection for '{prompt}', got {other:?}"
            ))),
        }
    }

    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        match self.next(prompt)? {
            Answer::Input(value) => {
                let value = value.trim();
                match (value.is_empty(), default) {
                    (true, Some(default)) => Ok(default.to_string()),
                    (true, None) => Err(CrudError::Prompt(format!(
                        "empty scripted input for required '{prompt}'"
                    ))),
                    (false, _) => Ok(value.to_string()),
                }
            }
            other => Err(CrudError::Prompt(format!(
                "expected text input for '{prompt}', got {other:?}"
            ))),
        }
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next(prompt)? {
            Answer::Confirm(answer) => Ok(answer),
            other => Err(CrudError::Prompt(format!(
                "expected a confirmation for '{prompt}', got {other:?}"
            ))),
        }
    }

    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

fn module(id: &str, admin: bool, core: bool) -> Module {
    Module {
        id: id.to_string(),
        base_path: format!("modules/{id}"),
        namespace: format!("app\\modules\\{id}"),
        admin,
        core,
    }
}

/// Registry with core, admin and frontend modules
///
/// | id             | admin | core |
/// |----------------|-------|------|
/// | `cms`          | no    | yes  |
/// | `admin`        | yes   | yes  |
/// | `cmsadmin`     | yes   | no   |
/// | `gallery`      | no    | no   |
/// | `galleryadmin` | yes   | no   |
#[must_use]
pub fn sample_registry() -> ModuleRegistry {
    ModuleRegistry::new(vec![
        module("cms", false, true),
        module("admin", true, true),
        module("cmsadmin", true, false),
        module("gallery", false, false),
        module("galleryadmin", true, false),
    ])
}

/// Catalog with `cms_navitem` (id, title, body, active) and `gallery_album`
#[must_use]
pub fn sample_catalog() -> SchemaCatalog {
    SchemaCatalog::new(vec![
        TableSchema::new(
            "cms_navitem",
            vec![
                Column::new("id", ColumnType::Integer).primary_key(),
                Column::new("title", ColumnType::String).with_size(255),
                Column::new("body", ColumnType::Text).nullable(),
                Column::new("active", ColumnType::Boolean),
            ],
        ),
        TableSchema::new(
            "gallery_album",
            vec![
                Column::new("id", ColumnType::Integer).primary_key(),
                Column::new("name", ColumnType::String).with_size(120),
                Column::new("cover_image_id", ColumnType::Integer).nullable(),
                Column::new("price", ColumnType::Decimal).nullable(),
                Column::new("created_at", ColumnType::Timestamp),
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_uses_default() {
        let mut prompter = ScriptedPrompter::new(vec![Answer::input(""), Answer::input("  x  ")]);
        assert_eq!(prompter.input("a", Some("dflt")).unwrap(), "dflt");
        assert_eq!(prompter.input("b", Some("dflt")).unwrap(), "x");
        assert_eq!(prompter.prompts(), ["a", "b"]);
    }

    #[test]
    fn test_exhausted_script() {
        let mut prompter = ScriptedPrompter::new(vec![]);
        assert!(matches!(prompter.confirm("c", true), Err(CrudError::Prompt(_))));
    }

    #[test]
    fn test_mismatched_answer_kind() {
        let mut prompter = ScriptedPrompter::new(vec![Answer::Confirm(true)]);
        assert!(matches!(
            prompter.select("s", &["a".to_string()]),
            Err(CrudError::Prompt(_))
        ));
    }
}
