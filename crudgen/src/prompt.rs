//! Console prompt primitives
//!
//! Every interactive step of the generator talks to the user through the
//! [`Prompter`] trait. [`TerminalPrompter`] is the real implementation built on
//! `dialoguer`; tests drive the flow with
//! [`ScriptedPrompter`](crate::testing::ScriptedPrompter).

use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::error::Result;

static INFO: Emoji<'_, '_> = Emoji("ℹ ", "");
static SUCCESS: Emoji<'_, '_> = Emoji("✓ ", "");
static ERROR: Emoji<'_, '_> = Emoji("✗ ", "");

/// Blocking user interaction used by the generator
pub trait Prompter {
    /// Ask the user to pick one of `items`, returning its index
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Ask for a required, non-empty text value
    ///
    /// Pressing enter on an empty line accepts `default` when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Ask a yes/no question
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Print an informational line
    fn info(&mut self, message: &str);

    /// Print a success line
    fn success(&mut self, message: &str);

    /// Print an error line
    fn error(&mut self, message: &str);
}

/// Interactive terminal prompter
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    /// Create a prompter using the colorful theme
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(index)
    }

    fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        let value = input
            .validate_with(|value: &String| -> std::result::Result<(), &str> {
                if value.trim().is_empty() {
                    Err("A value is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(answer)
    }

    fn info(&mut self, message: &str) {
        println!("{INFO}{}", style(message).cyan());
    }

    fn success(&mut self, message: &str) {
        println!("{SUCCESS}{}", style(message).green());
    }

    fn error(&mut self, message: &str) {
        println!("{ERROR}{}", style(message).red().bold());
    }
}
