// SPDX-License-Identifier: MIT

use std::path::PathBuf;

/// Snapshot of the working tree's pending changes, taken once per run.
///
/// An empty change set is a valid terminal state (nothing to commit),
/// not an error.
#[derive(Debug, Clone)]
pub struct ChangeSet {
    /// Unified diff of the pending changes.
    pub diff: String,
    /// Changed file paths, in the order the backend reported them.
    pub changed_paths: Vec<PathBuf>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.diff.trim().is_empty()
    }

    /// The scope the assisted flow derives from the change set: the single
    /// changed file's path when exactly one file changed, otherwise none.
    pub fn derived_scope(&self) -> Option<String> {
        match self.changed_paths.as_slice() {
            [only] => Some(only.display().to_string()),
            _ => None,
        }
    }
}
