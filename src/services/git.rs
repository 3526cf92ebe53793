// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::domain::ChangeSet;
use crate::error::{Error, Result};

pub struct GitService {
    repo: gix::Repository,
    work_dir: PathBuf,
}

impl GitService {
    pub fn discover() -> Result<Self> {
        let repo = gix::discover(".").map_err(|_| Error::NotAGitRepo)?;

        let work_dir = repo
            .work_dir()
            .ok_or_else(|| Error::Git("Bare repository not supported".into()))?
            .to_path_buf();

        Ok(Self { repo, work_dir })
    }

    pub fn check_state(&self) -> Result<()> {
        // Refuse to compose mid-merge
        let state = self.repo.state();
        if matches!(state, Some(gix::state::InProgress::Merge)) {
            return Err(Error::MergeInProgress);
        }
        Ok(())
    }

    /// Fetch the pending change set: unified diff plus changed paths.
    ///
    /// Two read-only backend queries, run with the workspace root as cwd.
    /// Non-fatal stderr chatter is logged and ignored; a non-zero exit is a
    /// hard failure carrying the backend's diagnostic text. Never retried.
    pub fn change_set(&self) -> Result<ChangeSet> {
        self.check_state()?;

        let diff = self.run_git(&["diff", "--no-ext-diff"])?;

        let name_output = self.run_git(&["diff", "--name-only"])?;
        let changed_paths: Vec<PathBuf> = name_output
            .lines()
            .filter(|l| !l.is_empty())
            .map(PathBuf::from)
            .collect();

        debug!(
            diff_len = diff.len(),
            files = changed_paths.len(),
            "change set fetched"
        );

        Ok(ChangeSet {
            diff,
            changed_paths,
        })
    }

    fn run_git(&self, args: &[&str]) -> Result<String> {
        let output = std::process::Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()?;

        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(Error::Git(stderr.trim().to_string()));
        }

        if !stderr.trim().is_empty() {
            warn!(command = ?args, stderr = %stderr.trim(), "git wrote to stderr");
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
