// SPDX-License-Identifier: MIT

use console::style;
use dialoguer::{Confirm, Editor, Input, Select};

use crate::domain::CommitType;
use crate::error::{Error, Result};
use crate::services::scopes::ScopeHistory;

/// The guided question sequence. Each prompt is independent; a declined
/// prompt returns `Error::Cancelled` and nothing runs after it.
///
/// A trait so the pipeline can be driven by a scripted stub in tests.
pub trait Elicit {
    fn choose_assist_mode(&mut self) -> Result<bool>;
    fn choose_commit_type(&mut self) -> Result<CommitType>;
    /// Three-way scope prompt: none, reuse-or-create a persistent scope, or
    /// a one-time scope. `None` means "no scope".
    fn choose_scope(&mut self) -> Result<Option<String>>;
    fn short_description(&mut self) -> Result<String>;
    /// May be empty; multi-line capable.
    fn long_description(&mut self) -> Result<String>;
    /// May be empty.
    fn breaking_note(&mut self) -> Result<String>;
    /// Non-fatal notice shown to the user (draft failures and the like).
    fn notify(&mut self, message: &str);
}

/// Terminal elicitor backed by `dialoguer`, seeded with the persisted scope
/// history.
pub struct DialogElicitor {
    scopes: ScopeHistory,
}

impl DialogElicitor {
    pub fn new(scopes: ScopeHistory) -> Self {
        Self { scopes }
    }

    fn cancelled<T>(selection: Option<T>) -> Result<T> {
        selection.ok_or(Error::Cancelled)
    }
}

impl Elicit for DialogElicitor {
    fn choose_assist_mode(&mut self) -> Result<bool> {
        let choice = Confirm::new()
            .with_prompt("Use AI assistance for the commit message?")
            .default(true)
            .interact_opt()?;
        Self::cancelled(choice)
    }

    fn choose_commit_type(&mut self) -> Result<CommitType> {
        let items: Vec<String> = CommitType::ALL
            .iter()
            .map(|t| format!("{:<10} {}", t.as_str(), style(t.description()).dim()))
            .collect();

        let selection = Select::new()
            .with_prompt("Select the type of change that you're committing")
            .items(&items)
            .default(0)
            .interact_opt()?;

        Ok(CommitType::ALL[Self::cancelled(selection)?])
    }

    fn choose_scope(&mut self) -> Result<Option<String>> {
        let mut items = vec!["None".to_string()];
        items.extend(self.scopes.entries().iter().cloned());
        items.push("New scope".to_string());
        items.push("New scope (only use once)".to_string());

        let selection = Select::new()
            .with_prompt("Select the scope of this change")
            .items(&items)
            .default(0)
            .interact_opt()?;
        let index = Self::cancelled(selection)?;

        let history_len = self.scopes.entries().len();
        if index == 0 {
            return Ok(None);
        }
        if index <= history_len {
            return Ok(Some(self.scopes.entries()[index - 1].clone()));
        }

        let scope: String = Input::new()
            .with_prompt("Enter the new scope")
            .allow_empty(true)
            .interact_text()?;
        let scope = scope.trim().to_string();
        if scope.is_empty() {
            return Ok(None);
        }

        // First of the two trailing options is the persistent one
        if index == history_len + 1 {
            self.scopes.remember(&scope);
        }
        Ok(Some(scope))
    }

    fn short_description(&mut self) -> Result<String> {
        let text: String = Input::new()
            .with_prompt("Write a short, imperative tense description of the change")
            .validate_with(|input: &String| {
                if input.trim().is_empty() {
                    Err("description cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(text.trim().to_string())
    }

    fn long_description(&mut self) -> Result<String> {
        let use_editor = Confirm::new()
            .with_prompt("Provide a longer description of the change? (opens your editor)")
            .default(false)
            .interact_opt()?;

        match Self::cancelled(use_editor)? {
            false => Ok(String::new()),
            true => {
                // A closed-without-saving editor counts as "no body"
                let text = Editor::new().edit("")?;
                Ok(text.map(|t| t.trim().to_string()).unwrap_or_default())
            }
        }
    }

    fn breaking_note(&mut self) -> Result<String> {
        let text: String = Input::new()
            .with_prompt("List any breaking changes or issues closed by this change (optional)")
            .allow_empty(true)
            .interact_text()?;
        Ok(text.trim().to_string())
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), message);
    }
}
