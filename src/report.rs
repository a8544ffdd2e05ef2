//! Console reporting for validation runs.
//!
//! Centralizes icons, colors, and formatting so command handlers stay thin.
//! The engine emits structured outcomes; everything user-facing about them
//! lives here.

use colored::{ColoredString, Colorize};

use crate::engine::{CheckReport, OutcomeStatus};
use crate::error::PreflightError;

/// Check if quiet mode is enabled via environment variable or --quiet flag
pub fn is_quiet() -> bool {
    std::env::var("PREFLIGHT_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Returns a colored icon for the given outcome status.
///
/// Icons:
/// - Ok: ✓ (green)
/// - Defaulted: • (cyan)
/// - Warned: ⚠ (yellow)
pub fn status_icon(status: &OutcomeStatus) -> ColoredString {
    match status {
        OutcomeStatus::Ok => "✓".green(),
        OutcomeStatus::Defaulted { .. } => "•".cyan(),
        OutcomeStatus::Warned => "⚠".yellow(),
    }
}

/// Color scheme for report text output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Green for present variables
    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    /// Yellow for warnings
    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    /// Red for fatal failures
    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// Cyan for variable names
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for secondary text and notices
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Bold for headings
    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }
}

/// Print an informational notice to stderr, suppressed in quiet mode.
///
/// Notices go to stderr so `--json` output on stdout stays machine-readable.
pub fn print_notice(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{} {}", "ℹ".cyan(), colors::secondary(message));
    }
}

/// Print per-variable outcomes and a summary line.
///
/// Quiet mode drops Ok lines and the summary; defaulted and warned lines
/// always print.
pub fn print_report(report: &CheckReport, quiet: bool) {
    let mut ok = 0usize;
    let mut defaulted = 0usize;
    let mut warned = 0usize;

    for outcome in &report.outcomes {
        match &outcome.status {
            OutcomeStatus::Ok => {
                ok += 1;
                if !quiet {
                    println!(
                        "{} {}",
                        status_icon(&outcome.status),
                        colors::success(&outcome.name)
                    );
                }
            }
            OutcomeStatus::Defaulted { .. } => {
                defaulted += 1;
                println!(
                    "{} {}  {}",
                    status_icon(&outcome.status),
                    colors::identifier(&outcome.name),
                    colors::secondary(outcome.message.as_deref().unwrap_or(""))
                );
            }
            OutcomeStatus::Warned => {
                warned += 1;
                println!(
                    "{} {}  {}",
                    status_icon(&outcome.status),
                    colors::identifier(&outcome.name),
                    colors::warning(outcome.message.as_deref().unwrap_or(""))
                );
            }
        }
    }

    if !quiet {
        let total = report.outcomes.len();
        println!(
            "\n{} {} checked: {} ok, {} defaulted, {} warnings",
            colors::heading("Preflight"),
            pluralize(total, "variable"),
            ok,
            defaulted,
            warned
        );
    }
}

/// Print a fatal error to stderr.
pub fn print_failure(err: &PreflightError) {
    eprintln!("{} {}", colors::error("✗"), err);
}

/// Render the report as a pretty JSON document for scripting.
pub fn render_json(report: &CheckReport, active_env: &str) -> serde_json::Result<String> {
    let doc = serde_json::json!({
        "environment": active_env,
        "outcomes": report.outcomes,
        "pending_defaults": report.pending_defaults,
    });
    serde_json::to_string_pretty(&doc)
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
