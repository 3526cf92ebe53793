// SPDX-License-Identifier: MIT

use console::style;
use tracing::{debug, warn};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{Pipeline, PipelineOutcome};
use crate::services::draft::OpenAiDrafter;
use crate::services::elicit::DialogElicitor;
use crate::services::git::GitService;
use crate::services::scopes::ScopeHistory;

pub struct App {
    cli: Cli,
    config: Config,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            model = %config.model,
            timeout_secs = config.timeout_secs,
            max_diff_lines = config.max_diff_lines,
            "config loaded"
        );
        Ok(Self { cli, config })
    }

    pub async fn run(&mut self) -> Result<()> {
        if let Some(ref cmd) = self.cli.command {
            return self.handle_command(cmd).await;
        }

        self.compose().await
    }

    async fn compose(&mut self) -> Result<()> {
        self.print_status("Inspecting working tree changes...");

        let git = GitService::discover()?;
        let change_set = git.change_set()?;

        if !change_set.is_empty() {
            self.print_info(&format!(
                "{} changed file(s) detected",
                change_set.changed_paths.len()
            ));
        }

        let mut elicitor = DialogElicitor::new(ScopeHistory::load());
        let drafter = OpenAiDrafter::new(&self.config, self.cli.show_prompt);

        let outcome = Pipeline::new(&mut elicitor, &drafter, self.cli.manual)
            .run(&change_set)
            .await?;

        match outcome {
            PipelineOutcome::NoChanges => {
                self.print_info("Not found any changes to commit.");
                Ok(())
            }
            PipelineOutcome::Completed { message } => {
                self.emit(&message);
                Ok(())
            }
        }
    }

    /// Output sink: the message goes to stdout for piping, and onto the
    /// clipboard as a convenience. This tool never creates a commit itself.
    fn emit(&self, message: &str) {
        println!("{message}");

        let copied = !self.cli.no_copy && Self::copy_to_clipboard(message);

        eprintln!();
        if copied {
            eprintln!(
                "{} New commit message generated! (copied to clipboard)",
                style("✓").green().bold()
            );
        } else {
            eprintln!(
                "{} New commit message generated!",
                style("✓").green().bold()
            );
        }
    }

    fn copy_to_clipboard(message: &str) -> bool {
        let result = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(message.to_string()));
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "clipboard unavailable");
                false
            }
        }
    }

    async fn handle_command(&self, cmd: &Commands) -> Result<()> {
        match cmd {
            Commands::Init => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                println!("Model: {}", self.config.model);
                println!(
                    "API base URL: {}",
                    self.config.api_base_url.as_deref().unwrap_or("(default)")
                );
                println!(
                    "API key: {}",
                    if self.config.api_key.is_some() {
                        "configured"
                    } else {
                        "not configured"
                    }
                );
                println!("Timeout: {}s", self.config.timeout_secs);
                println!("Temperature: {}", self.config.temperature);
                println!("Max tokens: {}", self.config.max_tokens);
                println!("Max diff lines: {}", self.config.max_diff_lines);
                Ok(())
            }
            Commands::Doctor => self.run_doctor().await,
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "commitforge", &mut std::io::stdout());
                Ok(())
            }
        }
    }

    async fn run_doctor(&self) -> Result<()> {
        eprintln!("{} Running diagnostics...\n", style("→").cyan());

        eprintln!("{}", style("Configuration").bold().underlined());
        eprintln!("  Model:       {}", self.config.model);
        eprintln!("  Timeout:     {}s", self.config.timeout_secs);
        if let Some(ref path) = Config::config_path() {
            let status = if path.exists() { "found" } else { "not found" };
            eprintln!("  Config file: {} ({})", path.display(), status);
        }
        eprintln!();

        eprintln!("{}", style("Completion Service").bold().underlined());
        let drafter = OpenAiDrafter::new(&self.config, false);
        if drafter.has_credential() {
            eprint!("  API: ");
            match drafter.verify().await {
                Ok(()) => eprintln!("{}", style("OK").green().bold()),
                Err(e) => eprintln!("{}: {}", style("ERROR").red().bold(), e),
            }
        } else {
            eprintln!("  API key: {}", style("MISSING").red().bold());
            eprintln!(
                "  Assisted mode will fall back to manual entry. Set {} or {}.",
                style("COMMITFORGE_API_KEY").yellow(),
                style("OPENAI_API_KEY").yellow()
            );
        }
        eprintln!();

        eprintln!("{}", style("Git Repository").bold().underlined());
        match GitService::discover() {
            Ok(_) => eprintln!("  Repository: {}", style("found").green()),
            Err(_) => eprintln!("  Repository: {}", style("NOT FOUND").red().bold()),
        }

        eprintln!();
        eprintln!("{} Diagnostics complete.", style("✓").green().bold());

        Ok(())
    }

    // ─── Output Helpers ───

    fn print_status(&self, msg: &str) {
        eprintln!("{} {}", style("→").cyan(), msg);
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }
}
