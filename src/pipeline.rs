// SPDX-License-Identifier: MIT

//! End-to-end composition flow: change set inspection, mode selection,
//! field elicitation, optional AI draft with manual fallback, and final
//! assembly.
//!
//! The run is a linear sequence with two branch points:
//!
//! ```text
//! Start ── empty diff ──▶ NoChanges
//!   │
//! ModeChoice ── assisted ──▶ derive scope, draft
//!   │                          ├─ Ok ─────────▶ BreakingNote
//!   │                          └─ Failed ─────▶ notice, manual short/long
//!   └── manual ──▶ scope prompt, short/long ──▶ BreakingNote
//!                                                   │
//!                                              Assemble ──▶ Completed
//! ```
//!
//! Draft failures never escape: they degrade to manual entry with the
//! reason surfaced once as a notice. Cancellation at any prompt aborts the
//! whole run with no partial output.

use tracing::{debug, info};

use crate::domain::{ChangeSet, CommitMessage, DraftOutcome};
use crate::error::Result;
use crate::services::draft::DraftGenerator;
use crate::services::elicit::Elicit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Final message, fully rendered.
    Completed { message: String },
    /// Empty change set; informational, nothing was elicited.
    NoChanges,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Assisted,
    Manual,
}

pub struct Pipeline<'a, E, D> {
    elicitor: &'a mut E,
    drafter: &'a D,
    /// Skip the assist-mode question and go straight to manual composition.
    force_manual: bool,
}

impl<'a, E: Elicit, D: DraftGenerator> Pipeline<'a, E, D> {
    pub fn new(elicitor: &'a mut E, drafter: &'a D, force_manual: bool) -> Self {
        Self {
            elicitor,
            drafter,
            force_manual,
        }
    }

    pub async fn run(&mut self, change_set: &ChangeSet) -> Result<PipelineOutcome> {
        // Empty change set terminates before any field is collected
        if change_set.is_empty() {
            info!("no pending changes, nothing to compose");
            return Ok(PipelineOutcome::NoChanges);
        }

        let mode = if self.force_manual || !self.elicitor.choose_assist_mode()? {
            Mode::Manual
        } else {
            Mode::Assisted
        };
        debug!(?mode, "composition mode chosen");

        // The type is always elicited before the branches diverge
        let commit_type = self.elicitor.choose_commit_type()?;

        let (scope, summary, body) = match mode {
            Mode::Assisted => {
                let scope = change_set.derived_scope();
                debug!(scope = scope.as_deref(), "scope derived from change set");

                let outcome = self
                    .drafter
                    .generate(&change_set.diff, commit_type, scope.as_deref())
                    .await;

                match outcome {
                    DraftOutcome::Ok { summary, body } => (scope, summary, body),
                    DraftOutcome::Failed { reason } => {
                        self.elicitor.notify(&format!(
                            "Draft generation failed ({reason}), falling back to manual entry"
                        ));
                        let summary = self.elicitor.short_description()?;
                        let body = self.elicitor.long_description()?;
                        (scope, summary, body)
                    }
                }
            }
            Mode::Manual => {
                let scope = self.elicitor.choose_scope()?;
                let summary = self.elicitor.short_description()?;
                let body = self.elicitor.long_description()?;
                (scope, summary, body)
            }
        };

        // Asked in both modes
        let breaking_note = self.elicitor.breaking_note()?;

        let message = CommitMessage {
            commit_type,
            scope,
            summary,
            body,
            breaking_note,
        };

        info!(commit_type = %message.commit_type, "commit message assembled");
        Ok(PipelineOutcome::Completed {
            message: message.render(),
        })
    }
}
