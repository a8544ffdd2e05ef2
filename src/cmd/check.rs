//! The `preflight check` command: validate the process environment.

use anyhow::Result;
use std::path::Path;

use preflight::normalize::normalize;
use preflight::{engine, report, Snapshot, DEFAULT_ENVIRONMENT, ENV_VAR};

/// Run validation against the process environment and report outcomes.
///
/// Exits the process with code 1 when a required variable is missing, 2 when
/// the rule file is malformed. Accepted defaults are committed to the process
/// environment unless `no_apply` is set.
pub fn cmd_check(
    rules_path: Option<&Path>,
    env: Option<&str>,
    quiet: bool,
    json: bool,
    no_apply: bool,
) -> Result<()> {
    let quiet = quiet || report::is_quiet();

    let (_path, rules) = super::load_rules_or_exit(rules_path);

    let active_env = resolve_active_env(env, quiet);

    let effective = match normalize(&rules, &active_env) {
        Ok(effective) => effective,
        Err(err) => {
            report::print_failure(&err);
            std::process::exit(err.exit_code());
        }
    };

    let snapshot = Snapshot::from_process_env();
    let check_report = match engine::check(&snapshot, &effective) {
        Ok(check_report) => check_report,
        Err(err) => {
            report::print_failure(&err);
            std::process::exit(err.exit_code());
        }
    };

    if !no_apply {
        check_report.apply_defaults();
    }

    if json {
        println!("{}", report::render_json(&check_report, &active_env)?);
    } else {
        report::print_report(&check_report, quiet);
    }

    Ok(())
}

/// Active environment: `--env` flag, then the APP_ENV variable, then the
/// fixed default with an informational notice that it was substituted.
fn resolve_active_env(flag: Option<&str>, quiet: bool) -> String {
    if let Some(name) = flag {
        return name.to_string();
    }

    match std::env::var(ENV_VAR) {
        Ok(name) if !name.is_empty() => name,
        _ => {
            report::print_notice(
                &format!(
                    "environment not set via --env or {}, using \"{}\" as default",
                    ENV_VAR, DEFAULT_ENVIRONMENT
                ),
                quiet,
            );
            DEFAULT_ENVIRONMENT.to_string()
        }
    }
}
