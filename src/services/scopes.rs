// SPDX-License-Identifier: MIT

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::Config;

/// Previously used persistent scopes, one per line in a file under the
/// user config dir. Read failures degrade to an empty history; the scope
/// prompt works the same either way.
pub struct ScopeHistory {
    path: Option<PathBuf>,
    scopes: Vec<String>,
}

impl ScopeHistory {
    pub fn load() -> Self {
        Self::from_path(Config::scope_history_path())
    }

    /// Load from an explicit path (or none, for an in-memory history).
    pub fn from_path(path: Option<PathBuf>) -> Self {
        let scopes: Vec<String> = path
            .as_deref()
            .and_then(|p| fs::read_to_string(p).ok())
            .map(|content| {
                content
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        debug!(count = scopes.len(), "scope history loaded");
        Self { path, scopes }
    }

    pub fn entries(&self) -> &[String] {
        &self.scopes
    }

    /// Remember a scope for later runs. Persistence failures are logged and
    /// swallowed; the scope still applies to the current run.
    pub fn remember(&mut self, scope: &str) {
        if self.scopes.iter().any(|s| s == scope) {
            return;
        }
        self.scopes.push(scope.to_string());

        let Some(ref path) = self.path else { return };
        let write = || -> std::io::Result<()> {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(path, self.scopes.join("\n") + "\n")
        };
        if let Err(e) = write() {
            warn!(error = %e, path = %path.display(), "could not persist scope history");
        }
    }
}
