//! Command module structure for the preflight CLI

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

use preflight::RuleSet;

pub mod check;
pub mod lint;

/// Resolve the rule file path: an explicit flag wins, otherwise probe the
/// working directory for the default names.
pub fn resolve_rules_path(flag: Option<&Path>) -> Result<PathBuf> {
    match flag {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Rule file not found: {}", path.display());
            }
            Ok(path.to_path_buf())
        }
        None => RuleSet::resolve_default_path(Path::new(".")),
    }
}

/// Load the rule file or terminate with exit code 2.
///
/// A missing or unreadable or malformed rule file is a configuration
/// failure, the same class as `PreflightError::InvalidRule`; it must never
/// exit with code 1, which is reserved for a missing required variable.
pub fn load_rules_or_exit(flag: Option<&Path>) -> (PathBuf, RuleSet) {
    let path = match resolve_rules_path(flag) {
        Ok(path) => path,
        Err(err) => exit_config_error(&err),
    };
    match RuleSet::load(&path) {
        Ok(rules) => (path, rules),
        Err(err) => exit_config_error(&err),
    }
}

fn exit_config_error(err: &anyhow::Error) -> ! {
    eprintln!("{} {:#}", "✗".red(), err);
    std::process::exit(2);
}
