// SPDX-License-Identifier: MIT

use std::time::Duration;

use async_trait::async_trait;
use console::style;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::{CommitType, DraftOutcome};
use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const SYSTEM_PROMPT: &str = "You are a commit message assistant. Reply with a commit message \
only: a short imperative summary line, then a blank line, then an optional longer body. \
No markdown, no code fences, no commentary.";

/// Requests a natural-language draft for a change set.
///
/// Implementations map every internal failure into `DraftOutcome::Failed`;
/// nothing escapes this boundary as a hard error.
#[async_trait]
pub trait DraftGenerator: Send + Sync {
    async fn generate(
        &self,
        diff: &str,
        commit_type: CommitType,
        scope: Option<&str>,
    ) -> DraftOutcome;

    fn name(&self) -> &str;
}

/// Build the single instruction embedding commit type, optional scope, and
/// the diff, truncated to `max_diff_lines`.
pub fn build_instruction(
    diff: &str,
    commit_type: CommitType,
    scope: Option<&str>,
    max_diff_lines: usize,
) -> String {
    let truncated: Vec<&str> = diff.lines().take(max_diff_lines).collect();
    let scope_part = match scope {
        Some(s) if !s.is_empty() => format!(" and scope \"{s}\""),
        _ => String::new(),
    };
    format!(
        "Generate a commit message for the following git diff, using the commit type \
\"{commit_type}\"{scope_part}:\n\n{}\n\nCommit message:",
        truncated.join("\n")
    )
}

pub struct OpenAiDrafter {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
    max_diff_lines: usize,
    show_prompt: bool,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiDrafter {
    pub fn new(config: &Config, show_prompt: bool) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config
                .api_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_diff_lines: config.max_diff_lines,
            show_prompt,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Doctor-only connectivity check against the models endpoint.
    pub async fn verify(&self) -> Result<()> {
        let Some(ref key) = self.api_key else {
            return Err(Error::Config(
                "No API key configured. Set COMMITFORGE_API_KEY or OPENAI_API_KEY".into(),
            ));
        };

        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {key}"))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Config("API key rejected by the service".into()));
        }
        if !response.status().is_success() {
            return Err(Error::Config(format!(
                "service responded with HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn request_draft(
        &self,
        diff: &str,
        commit_type: CommitType,
        scope: Option<&str>,
    ) -> std::result::Result<String, String> {
        let Some(ref key) = self.api_key else {
            return Err("no API key configured (set COMMITFORGE_API_KEY or OPENAI_API_KEY)".into());
        };

        let instruction = build_instruction(diff, commit_type, scope, self.max_diff_lines);

        if self.show_prompt {
            eprintln!("{}", style("--- PROMPT ---").dim());
            eprintln!("{instruction}");
            eprintln!("{}", style("--- END PROMPT ---").dim());
        }

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {key}"))
            .json(&ChatRequest {
                model: self.model.clone(),
                messages: vec![
                    Message {
                        role: "system".into(),
                        content: SYSTEM_PROMPT.into(),
                    },
                    Message {
                        role: "user".into(),
                        content: instruction,
                    },
                ],
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    e.to_string()
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {status}: {}", body.trim()));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("malformed response: {e}"))?;

        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| "response contained no choices".to_string())?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl DraftGenerator for OpenAiDrafter {
    async fn generate(
        &self,
        diff: &str,
        commit_type: CommitType,
        scope: Option<&str>,
    ) -> DraftOutcome {
        match self.request_draft(diff, commit_type, scope).await {
            Ok(text) => {
                debug!(chars = text.len(), "draft received");
                DraftOutcome::from_text(&text)
            }
            Err(reason) => {
                warn!(%reason, "draft request failed");
                DraftOutcome::Failed { reason }
            }
        }
    }

    fn name(&self) -> &str {
        "openai"
    }
}
