// SPDX-License-Identifier: MIT

//! Pipeline state-machine scenarios driven by scripted collaborators.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use commitforge::domain::{ChangeSet, CommitType, DraftOutcome};
use commitforge::error::Error;
use commitforge::pipeline::{Pipeline, PipelineOutcome};
use commitforge::services::draft::DraftGenerator;
use commitforge::services::elicit::Elicit;

// ─── Scripted collaborators ──────────────────────────────────────────────────

/// Elicitor that answers from a script and records every prompt it served.
struct ScriptedElicitor {
    assist: bool,
    commit_type: CommitType,
    scope: Option<String>,
    short: String,
    long: String,
    breaking: String,
    /// Prompt name at which to simulate a user cancellation.
    cancel_at: Option<&'static str>,
    prompts: Vec<&'static str>,
    notices: Vec<String>,
}

impl ScriptedElicitor {
    fn new(commit_type: CommitType) -> Self {
        Self {
            assist: false,
            commit_type,
            scope: None,
            short: "Do something".into(),
            long: String::new(),
            breaking: String::new(),
            cancel_at: None,
            prompts: Vec::new(),
            notices: Vec::new(),
        }
    }

    fn record(&mut self, prompt: &'static str) -> Result<(), Error> {
        if self.cancel_at == Some(prompt) {
            return Err(Error::Cancelled);
        }
        self.prompts.push(prompt);
        Ok(())
    }
}

impl Elicit for ScriptedElicitor {
    fn choose_assist_mode(&mut self) -> Result<bool, Error> {
        self.record("assist")?;
        Ok(self.assist)
    }

    fn choose_commit_type(&mut self) -> Result<CommitType, Error> {
        self.record("type")?;
        Ok(self.commit_type)
    }

    fn choose_scope(&mut self) -> Result<Option<String>, Error> {
        self.record("scope")?;
        Ok(self.scope.clone())
    }

    fn short_description(&mut self) -> Result<String, Error> {
        self.record("short")?;
        Ok(self.short.clone())
    }

    fn long_description(&mut self) -> Result<String, Error> {
        self.record("long")?;
        Ok(self.long.clone())
    }

    fn breaking_note(&mut self) -> Result<String, Error> {
        self.record("breaking")?;
        Ok(self.breaking.clone())
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// Drafter that returns a fixed outcome and counts invocations.
struct StubDrafter {
    outcome: DraftOutcome,
    calls: AtomicUsize,
}

impl StubDrafter {
    fn ok(summary: &str, body: &str) -> Self {
        Self {
            outcome: DraftOutcome::Ok {
                summary: summary.into(),
                body: body.into(),
            },
            calls: AtomicUsize::new(0),
        }
    }

    fn failed(reason: &str) -> Self {
        Self {
            outcome: DraftOutcome::Failed {
                reason: reason.into(),
            },
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DraftGenerator for StubDrafter {
    async fn generate(
        &self,
        _diff: &str,
        _commit_type: CommitType,
        _scope: Option<&str>,
    ) -> DraftOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn name(&self) -> &str {
        "stub"
    }
}

fn change_set(diff: &str, paths: &[&str]) -> ChangeSet {
    ChangeSet {
        diff: diff.into(),
        changed_paths: paths.iter().map(PathBuf::from).collect(),
    }
}

// ─── Empty change set ────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_diff_aborts_before_any_prompt() {
    let mut elicitor = ScriptedElicitor::new(CommitType::Feat);
    let drafter = StubDrafter::ok("x", "y");

    let outcome = Pipeline::new(&mut elicitor, &drafter, false)
        .run(&change_set("   \n", &[]))
        .await
        .unwrap();

    assert_eq!(outcome, PipelineOutcome::NoChanges);
    assert!(elicitor.prompts.is_empty(), "prompts: {:?}", elicitor.prompts);
    assert_eq!(drafter.call_count(), 0);
}

// ─── Assisted mode ───────────────────────────────────────────────────────────

#[tokio::test]
async fn assisted_single_file_uses_path_as_scope() {
    let mut elicitor = ScriptedElicitor::new(CommitType::Fix);
    elicitor.assist = true;
    let drafter = StubDrafter::ok("Fix bug", "Details.");

    let outcome = Pipeline::new(&mut elicitor, &drafter, false)
        .run(&change_set("-old\n+new", &["src/a.ts"]))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PipelineOutcome::Completed {
            message: "fix(src/a.ts): Fix bug\n\nDetails.".into()
        }
    );
    assert_eq!(drafter.call_count(), 1);
    // No manual description prompts and no scope prompt in the happy path
    assert_eq!(elicitor.prompts, ["assist", "type", "breaking"]);
}

#[tokio::test]
async fn assisted_multi_file_has_no_scope() {
    let mut elicitor = ScriptedElicitor::new(CommitType::Feat);
    elicitor.assist = true;
    let drafter = StubDrafter::ok("Add thing", "");

    let outcome = Pipeline::new(&mut elicitor, &drafter, false)
        .run(&change_set("+new", &["src/a.rs", "src/b.rs"]))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PipelineOutcome::Completed {
            message: "feat: Add thing\n\n".into()
        }
    );
}

#[tokio::test]
async fn draft_failure_falls_back_to_manual_descriptions() {
    let mut elicitor = ScriptedElicitor::new(CommitType::Feat);
    elicitor.assist = true;
    elicitor.short = "Add thing".into();
    let drafter = StubDrafter::failed("timeout");

    let outcome = Pipeline::new(&mut elicitor, &drafter, false)
        .run(&change_set("+new", &["src/a.rs", "src/b.rs"]))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PipelineOutcome::Completed {
            message: "feat: Add thing\n\n".into()
        }
    );
    // The reason is surfaced exactly once, and only the description prompts
    // follow the fallback: the derived scope is kept, never re-asked.
    assert_eq!(elicitor.notices.len(), 1);
    assert!(elicitor.notices[0].contains("timeout"));
    assert_eq!(elicitor.prompts, ["assist", "type", "short", "long", "breaking"]);
}

#[tokio::test]
async fn draft_failure_keeps_the_derived_scope() {
    let mut elicitor = ScriptedElicitor::new(CommitType::Fix);
    elicitor.assist = true;
    elicitor.short = "Patch parser".into();
    let drafter = StubDrafter::failed("HTTP 500: nope");

    let outcome = Pipeline::new(&mut elicitor, &drafter, false)
        .run(&change_set("+new", &["src/parser.rs"]))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PipelineOutcome::Completed {
            message: "fix(src/parser.rs): Patch parser\n\n".into()
        }
    );
}

// ─── Manual mode ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn manual_mode_without_scope() {
    let mut elicitor = ScriptedElicitor::new(CommitType::Docs);
    elicitor.short = "Update readme".into();
    let drafter = StubDrafter::ok("unused", "unused");

    let outcome = Pipeline::new(&mut elicitor, &drafter, false)
        .run(&change_set("+new", &["README.md"]))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PipelineOutcome::Completed {
            message: "docs: Update readme\n\n".into()
        }
    );
    assert_eq!(drafter.call_count(), 0);
    assert_eq!(
        elicitor.prompts,
        ["assist", "type", "scope", "short", "long", "breaking"]
    );
}

#[tokio::test]
async fn manual_mode_with_scope_body_and_breaking_note() {
    let mut elicitor = ScriptedElicitor::new(CommitType::Refactor);
    elicitor.scope = Some("api".into());
    elicitor.short = "Rework auth".into();
    elicitor.long = "Token handling moved into middleware.".into();
    elicitor.breaking = "drops the v1 login route".into();
    let drafter = StubDrafter::ok("unused", "unused");

    let outcome = Pipeline::new(&mut elicitor, &drafter, false)
        .run(&change_set("+new", &["src/auth.rs"]))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        PipelineOutcome::Completed {
            message: "refactor(api): Rework auth\n\nToken handling moved into middleware.\n\n\
BREAKING CHANGES: drops the v1 login route"
                .into()
        }
    );
}

#[tokio::test]
async fn force_manual_skips_the_assist_prompt() {
    let mut elicitor = ScriptedElicitor::new(CommitType::Docs);
    elicitor.short = "Update readme".into();
    let drafter = StubDrafter::ok("unused", "unused");

    Pipeline::new(&mut elicitor, &drafter, true)
        .run(&change_set("+new", &["README.md"]))
        .await
        .unwrap();

    assert!(!elicitor.prompts.contains(&"assist"));
    assert_eq!(elicitor.prompts[0], "type");
}

// ─── Cancellation ────────────────────────────────────────────────────────────

#[tokio::test]
async fn cancellation_mid_elicitation_aborts_the_run() {
    let mut elicitor = ScriptedElicitor::new(CommitType::Feat);
    elicitor.cancel_at = Some("short");
    let drafter = StubDrafter::ok("unused", "unused");

    let result = Pipeline::new(&mut elicitor, &drafter, false)
        .run(&change_set("+new", &["src/a.rs"]))
        .await;

    assert!(matches!(result, Err(Error::Cancelled)));
    // Nothing past the cancelled prompt ran
    assert!(!elicitor.prompts.contains(&"breaking"));
}

#[tokio::test]
async fn cancellation_at_mode_choice_aborts_immediately() {
    let mut elicitor = ScriptedElicitor::new(CommitType::Feat);
    elicitor.cancel_at = Some("assist");
    let drafter = StubDrafter::ok("unused", "unused");

    let result = Pipeline::new(&mut elicitor, &drafter, false)
        .run(&change_set("+new", &["src/a.rs"]))
        .await;

    assert!(matches!(result, Err(Error::Cancelled)));
    assert!(elicitor.prompts.is_empty());
    assert_eq!(drafter.call_count(), 0);
}
