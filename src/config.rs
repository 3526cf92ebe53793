// SPDX-License-Identifier: MIT

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer credential for the completion service. Deliberately optional:
    /// a missing key degrades the assisted flow at generation time instead
    /// of blocking manual composition.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for OpenAI-compatible APIs (default: https://api.openai.com/v1)
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Request timeout in seconds for the draft request (default 120)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature (0.0-2.0, default 0.5)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens the service may generate for a draft (default 200)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Maximum diff lines embedded in the draft instruction
    #[serde(default = "default_max_diff_lines")]
    pub max_diff_lines: usize,
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_timeout_secs() -> u64 {
    120
}
fn default_temperature() -> f32 {
    0.5
}
fn default_max_tokens() -> u32 {
    200
}
fn default_max_diff_lines() -> usize {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: None,
            api_base_url: None,
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_diff_lines: default_max_diff_lines(),
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.commitforge.toml in repo root)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".commitforge.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        // User-level config
        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // Environment variables (COMMITFORGE_MODEL, COMMITFORGE_API_KEY, ...)
        figment = figment.merge(Env::prefixed("COMMITFORGE_"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        // Conventional fallback for the credential
        if config.api_key.is_none() {
            config.api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "commitforge").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Where previously used persistent scopes are remembered.
    pub fn scope_history_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("scopes"))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref m) = cli.model {
            self.model = m.clone();
        }
    }

    fn validate(&self) -> Result<()> {
        if !(1..=3600).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "timeout_secs must be 1–3600, got {}",
                self.timeout_secs
            )));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "temperature must be 0.0–2.0, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(Error::Config("max_tokens must be positive".into()));
        }

        if !(10..=10_000).contains(&self.max_diff_lines) {
            return Err(Error::Config(format!(
                "max_diff_lines must be 10–10000, got {}",
                self.max_diff_lines
            )));
        }

        if let Some(ref url) = self.api_base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::Config(format!(
                    "api_base_url must start with http:// or https://, got '{url}'"
                )));
            }
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# commitforge configuration

# Model used for assisted drafting
model = "gpt-4o-mini"

# Credential for the completion service. Prefer the COMMITFORGE_API_KEY or
# OPENAI_API_KEY environment variables over storing it here.
# api_key = ""

# Base URL for OpenAI-compatible APIs
# api_base_url = "https://api.openai.com/v1"

# Draft request timeout in seconds
timeout_secs = 120

# Sampling temperature for drafts
temperature = 0.5

# Maximum tokens generated per draft
max_tokens = 200

# Maximum diff lines embedded in the draft instruction
max_diff_lines = 500
"#;

        fs::write(&path, content)?;

        // Set secure permissions (0600): the file may hold a credential
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}
