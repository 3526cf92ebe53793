// SPDX-License-Identifier: MIT

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "commitforge")]
#[command(version)]
#[command(about = "Interactive conventional-commit message composer", long_about = None)]
pub struct Cli {
    /// Model name for assisted drafting
    #[arg(short, long, env = "COMMITFORGE_MODEL")]
    pub model: Option<String>,

    /// Skip the assist-mode question and compose manually
    #[arg(long)]
    pub manual: bool,

    /// Don't copy the composed message to the clipboard
    #[arg(long)]
    pub no_copy: bool,

    /// Show the instruction sent to the completion service
    #[arg(long)]
    pub show_prompt: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Check configuration, completion service, and git repository
    Doctor,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
