//! The `preflight lint` command: check the rule file itself.
//!
//! Lint never consults the process environment. It normalizes the rule file
//! against every environment name the file references, so configuration
//! errors surface before a deploy instead of at startup in one environment.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use preflight::normalize::normalize;
use preflight::rules::EnvScope;
use preflight::PreflightError;

pub fn cmd_lint(rules_path: Option<&Path>) -> Result<()> {
    let (path, rules) = super::load_rules_or_exit(rules_path);

    if rules.is_empty() {
        println!("{} {} declares no variables", "•".yellow(), path.display());
        return Ok(());
    }

    let mut failures = 0usize;

    // Scope shapes first: a malformed env field would otherwise hide behind
    // "no environments referenced".
    for (name, rule) in &rules.0 {
        if matches!(rule.env, EnvScope::Other(_)) {
            failures += 1;
            let err = PreflightError::InvalidRule {
                path: format!("{}.env", name),
                reason: "must be array or object".to_string(),
            };
            eprintln!("{} {}", "✗".red(), err);
        }
    }

    // A bad shape fails normalization for every environment; stop here so
    // each offense is reported once.
    if failures > 0 {
        eprintln!(
            "\n{} {} with {} error{}",
            "Error:".red(),
            path.display(),
            failures,
            if failures == 1 { "" } else { "s" }
        );
        std::process::exit(2);
    }

    let environments = rules.environments();
    if environments.is_empty() {
        println!(
            "{} {} references no environments; no rule can ever apply",
            "⚠".yellow(),
            path.display()
        );
        return Ok(());
    }

    for env_name in &environments {
        match normalize(&rules, env_name) {
            Ok(effective) => {
                println!(
                    "{} {}  {} applicable {}",
                    "✓".green(),
                    env_name.cyan(),
                    effective.len(),
                    if effective.len() == 1 { "rule" } else { "rules" }
                );
            }
            Err(err) => {
                failures += 1;
                eprintln!("{} {}  {}", "✗".red(), env_name.cyan(), err);
            }
        }
    }

    if failures > 0 {
        eprintln!(
            "\n{} {} with {} error{}",
            "Error:".red(),
            path.display(),
            failures,
            if failures == 1 { "" } else { "s" }
        );
        std::process::exit(2);
    }

    println!(
        "\n{} {} variables across {} environments, no errors",
        "Done!".green(),
        rules.len(),
        environments.len()
    );
    Ok(())
}
