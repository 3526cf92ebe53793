// SPDX-License-Identifier: MIT

/// Result of one draft attempt against the remote completion service.
///
/// Never partially populated: either both fields of a successful draft are
/// present, or the attempt failed with a displayable reason. Failures are
/// recovered inside the pipeline and never surface as hard errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOutcome {
    Ok { summary: String, body: String },
    Failed { reason: String },
}

impl DraftOutcome {
    /// Split free text from the service into summary and body on the first
    /// blank-line boundary. Without a blank line the whole text is the
    /// summary. The split is positional, not semantic: the service is
    /// trusted to follow the requested format.
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::Failed {
                reason: "service returned empty text".into(),
            };
        }
        match text.split_once("\n\n") {
            Some((summary, body)) => Self::Ok {
                summary: summary.trim().to_string(),
                body: body.trim().to_string(),
            },
            None => Self::Ok {
                summary: text.to_string(),
                body: String::new(),
            },
        }
    }
}
