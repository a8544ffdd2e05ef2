//! CLI entry point and command handlers for preflight.

mod cmd;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "preflight")]
#[command(version)]
#[command(about = "Fail-fast environment variable validation", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    Declare expected variables in .env.validate.yml, then run\n    'preflight check' before starting your application.\n\n    Exit codes: 0 = ok, 1 = missing required variable, 2 = malformed rule file."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the process environment against the rule file
    Check {
        /// Path to the rule file (default: probe .env.validate.yml/.yaml/.json)
        #[arg(long, value_name = "PATH")]
        rules: Option<PathBuf>,
        /// Active environment name (default: $APP_ENV, then "development")
        #[arg(long, value_name = "NAME")]
        env: Option<String>,
        /// Suppress per-variable ok lines and notices
        #[arg(long)]
        quiet: bool,
        /// Emit the report as JSON on stdout
        #[arg(long)]
        json: bool,
        /// Do not commit accepted defaults to the process environment
        #[arg(long)]
        no_apply: bool,
    },
    /// Check the rule file against every environment it references
    Lint {
        /// Path to the rule file (default: probe .env.validate.yml/.yaml/.json)
        #[arg(long, value_name = "PATH")]
        rules: Option<PathBuf>,
    },
    /// Show version information
    Version {
        /// Show additional build information
        #[arg(long, short)]
        verbose: bool,
    },
    /// Generate shell completion script
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Plain output when stdout is not a terminal (piped into scripts/logs)
    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Check {
            rules,
            env,
            quiet,
            json,
            no_apply,
        } => cmd::check::cmd_check(rules.as_deref(), env.as_deref(), quiet, json, no_apply),
        Commands::Lint { rules } => cmd::lint::cmd_lint(rules.as_deref()),
        Commands::Version { verbose } => cmd_version(verbose),
        Commands::Completion { shell } => cmd_completion(shell),
    }
}

/// Show version information
fn cmd_version(verbose: bool) -> Result<()> {
    println!("preflight {}", env!("CARGO_PKG_VERSION"));

    if verbose {
        println!("  commit: {}", env!("GIT_SHA").cyan());
        println!("  built:  {}", env!("BUILD_DATE").cyan());
    }

    Ok(())
}

/// Generate shell completion script
fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "preflight", &mut io::stdout());
    Ok(())
}
