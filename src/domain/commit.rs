// SPDX-License-Identifier: MIT

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
}

impl CommitType {
    /// Fixed catalog, in presentation order.
    pub const ALL: [CommitType; 9] = [
        Self::Feat,
        Self::Fix,
        Self::Docs,
        Self::Style,
        Self::Refactor,
        Self::Perf,
        Self::Test,
        Self::Build,
        Self::Ci,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Feat => "A new feature",
            Self::Fix => "A bug fix",
            Self::Docs => "Documentation only changes",
            Self::Style => "Changes that do not affect the meaning of the code",
            Self::Refactor => "A code change that neither fixes a bug nor adds a feature",
            Self::Perf => "A code change that improves performance",
            Self::Test => "Adding missing tests or correcting existing tests",
            Self::Build => "Changes that affect the build system or external dependencies",
            Self::Ci => "Changes to CI configuration files and scripts",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully elicited commit message. Immutable once assembled; rendering is the
/// only operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub summary: String,
    pub body: String,
    pub breaking_note: String,
}

impl CommitMessage {
    /// Render the final message:
    ///
    /// ```text
    /// <type>(<scope>): <summary>
    ///
    /// <body>
    ///
    /// BREAKING CHANGES: <note>
    /// ```
    ///
    /// The scope segment (parens included) is omitted when the scope is
    /// absent or empty. The blank line after the header is always emitted,
    /// even for an empty body. The breaking section only appears for a
    /// non-empty note.
    pub fn render(&self) -> String {
        let mut message = String::new();
        message.push_str(self.commit_type.as_str());
        if let Some(scope) = self.scope.as_deref().filter(|s| !s.is_empty()) {
            message.push('(');
            message.push_str(scope);
            message.push(')');
        }
        message.push_str(": ");
        message.push_str(&self.summary);
        message.push_str("\n\n");
        message.push_str(&self.body);
        if !self.breaking_note.is_empty() {
            message.push_str("\n\nBREAKING CHANGES: ");
            message.push_str(&self.breaking_note);
        }
        message
    }
}
