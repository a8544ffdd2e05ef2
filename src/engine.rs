//! Validation engine: applies per-variable policy to a snapshot.
//!
//! The engine is pure. It reads the snapshot supplied by the caller, never
//! the live process environment, and it records accepted defaults as pending
//! writes instead of committing them. The caller decides when (and whether)
//! to commit via [`CheckReport::apply_defaults`].
//!
//! Evaluation is fail-fast: the first required variable that is absent with
//! no default aborts the run with [`PreflightError::MissingRequired`] and no
//! later variable is evaluated. Warnings and defaulting never stop the run.

use serde::Serialize;

use crate::error::PreflightError;
use crate::normalize::{EffectiveRules, Severity};
use crate::snapshot::Snapshot;

/// What happened to one declared variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Present in the snapshot.
    Ok,
    /// Absent; the rule's default was accepted as a pending write.
    Defaulted { value: String },
    /// Absent recommended variable with no default. Advisory only.
    Warned,
}

/// Per-variable result, in rule declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableOutcome {
    pub name: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
    /// Resolved message for Defaulted and Warned outcomes; None for Ok.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a completed (non-fatal) validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub outcomes: Vec<VariableOutcome>,
    /// Accepted default values in write order. Not yet committed to the
    /// process environment.
    pub pending_defaults: Vec<(String, String)>,
}

impl CheckReport {
    /// Commit every pending default to the process-wide environment.
    ///
    /// This is the engine's only side channel; callers running validation
    /// concurrently must serialize around it themselves.
    pub fn apply_defaults(&self) {
        for (name, value) in &self.pending_defaults {
            std::env::set_var(name, value);
        }
    }

    pub fn warnings(&self) -> impl Iterator<Item = &VariableOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Warned)
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }
}

/// Validate `snapshot` against the effective rules, one outcome per rule in
/// declaration order.
///
/// Presence is evaluated against the supplied snapshot only; a default
/// accepted for an earlier variable never makes a later one present.
pub fn check(
    snapshot: &Snapshot,
    rules: &EffectiveRules,
) -> Result<CheckReport, PreflightError> {
    let mut report = CheckReport::default();

    for (name, rule) in rules {
        if snapshot.contains(name) {
            report.outcomes.push(VariableOutcome {
                name: name.clone(),
                status: OutcomeStatus::Ok,
                message: None,
            });
            continue;
        }

        match (&rule.default_value, rule.severity) {
            (Some(value), severity) => {
                let message = rule
                    .message
                    .clone()
                    .unwrap_or_else(|| defaulted_message(name, value, severity));
                report.pending_defaults.push((name.clone(), value.clone()));
                report.outcomes.push(VariableOutcome {
                    name: name.clone(),
                    status: OutcomeStatus::Defaulted {
                        value: value.clone(),
                    },
                    message: Some(message),
                });
            }
            (None, Severity::Required) => {
                let message = rule
                    .message
                    .clone()
                    .unwrap_or_else(|| missing_required_message(name));
                return Err(PreflightError::MissingRequired {
                    name: name.clone(),
                    message,
                });
            }
            (None, Severity::Recommended) => {
                let message = rule
                    .message
                    .clone()
                    .unwrap_or_else(|| missing_recommended_message(name));
                report.outcomes.push(VariableOutcome {
                    name: name.clone(),
                    status: OutcomeStatus::Warned,
                    message: Some(message),
                });
            }
        }
    }

    Ok(report)
}

fn defaulted_message(name: &str, value: &str, severity: Severity) -> String {
    let tier = match severity {
        Severity::Required => "required",
        Severity::Recommended => "needed",
    };
    format!(
        "Missing {} env var \"{}\". Defaulting to a value of \"{}\"",
        tier, name, value
    )
}

fn missing_required_message(name: &str) -> String {
    format!(
        "Missing required env var \"{}\". App can't start without it.",
        name
    )
}

fn missing_recommended_message(name: &str) -> String {
    format!("Missing needed env var \"{}\"", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::EffectiveRule;
    use indexmap::IndexMap;

    fn rule(
        severity: Severity,
        message: Option<&str>,
        default_value: Option<&str>,
    ) -> EffectiveRule {
        EffectiveRule {
            severity,
            message: message.map(String::from),
            default_value: default_value.map(String::from),
        }
    }

    fn rules(entries: Vec<(&str, EffectiveRule)>) -> EffectiveRules {
        entries
            .into_iter()
            .map(|(name, rule)| (name.to_string(), rule))
            .collect::<IndexMap<_, _>>()
    }

    #[test]
    fn test_required_present_is_ok_regardless_of_default() {
        let snapshot: Snapshot = [("DB_HOST", "db.internal")].into_iter().collect();
        let rules = rules(vec![(
            "DB_HOST",
            rule(Severity::Required, None, Some("localhost")),
        )]);

        let report = check(&snapshot, &rules).unwrap();
        assert_eq!(
            report.outcomes,
            vec![VariableOutcome {
                name: "DB_HOST".to_string(),
                status: OutcomeStatus::Ok,
                message: None,
            }]
        );
        assert!(report.pending_defaults.is_empty());
    }

    #[test]
    fn test_required_absent_with_default_is_defaulted() {
        let snapshot = Snapshot::new();
        let rules = rules(vec![(
            "PORT",
            rule(Severity::Required, None, Some("3000")),
        )]);

        let report = check(&snapshot, &rules).unwrap();
        assert_eq!(
            report.pending_defaults,
            vec![("PORT".to_string(), "3000".to_string())]
        );
        let outcome = &report.outcomes[0];
        assert_eq!(
            outcome.status,
            OutcomeStatus::Defaulted {
                value: "3000".to_string()
            }
        );
        assert_eq!(
            outcome.message.as_deref(),
            Some("Missing required env var \"PORT\". Defaulting to a value of \"3000\"")
        );
    }

    #[test]
    fn test_required_absent_without_default_fails_with_generated_message() {
        let snapshot = Snapshot::new();
        let rules = rules(vec![("API_KEY", rule(Severity::Required, None, None))]);

        let err = check(&snapshot, &rules).unwrap_err();
        assert_eq!(
            err,
            PreflightError::MissingRequired {
                name: "API_KEY".to_string(),
                message: "Missing required env var \"API_KEY\". App can't start without it."
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_custom_message_overrides_generated_phrase() {
        let snapshot = Snapshot::new();
        let rules = rules(vec![(
            "API_KEY",
            rule(Severity::Required, Some("ask ops for the API key"), None),
        )]);

        let err = check(&snapshot, &rules).unwrap_err();
        assert_eq!(
            err,
            PreflightError::MissingRequired {
                name: "API_KEY".to_string(),
                message: "ask ops for the API key".to_string(),
            }
        );
    }

    #[test]
    fn test_recommended_absent_without_default_warns_and_continues() {
        let snapshot: Snapshot = [("LAST", "set")].into_iter().collect();
        let rules = rules(vec![
            ("CACHE_URL", rule(Severity::Recommended, None, None)),
            ("LAST", rule(Severity::Required, None, None)),
        ]);

        let report = check(&snapshot, &rules).unwrap();
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].status, OutcomeStatus::Warned);
        assert_eq!(
            report.outcomes[0].message.as_deref(),
            Some("Missing needed env var \"CACHE_URL\"")
        );
        assert_eq!(report.outcomes[1].status, OutcomeStatus::Ok);
        assert!(report.has_warnings());
    }

    #[test]
    fn test_recommended_absent_with_default_is_defaulted_not_warned() {
        let snapshot = Snapshot::new();
        let rules = rules(vec![(
            "LOG_LEVEL",
            rule(Severity::Recommended, None, Some("info")),
        )]);

        let report = check(&snapshot, &rules).unwrap();
        assert_eq!(
            report.outcomes[0].status,
            OutcomeStatus::Defaulted {
                value: "info".to_string()
            }
        );
        assert_eq!(
            report.outcomes[0].message.as_deref(),
            Some("Missing needed env var \"LOG_LEVEL\". Defaulting to a value of \"info\"")
        );
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_fail_fast_stops_at_first_missing_required() {
        let snapshot = Snapshot::new();
        let rules = rules(vec![
            ("FIRST", rule(Severity::Recommended, None, Some("one"))),
            ("FATAL", rule(Severity::Required, None, None)),
            ("NEVER", rule(Severity::Recommended, None, None)),
        ]);

        let err = check(&snapshot, &rules).unwrap_err();
        assert!(matches!(
            err,
            PreflightError::MissingRequired { ref name, .. } if name == "FATAL"
        ));
    }

    #[test]
    fn test_outcomes_follow_declaration_order() {
        let snapshot: Snapshot = [("B", "set")].into_iter().collect();
        let rules = rules(vec![
            ("C", rule(Severity::Recommended, None, None)),
            ("B", rule(Severity::Required, None, None)),
            ("A", rule(Severity::Recommended, None, Some("a"))),
        ]);

        let report = check(&snapshot, &rules).unwrap();
        let names: Vec<&str> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["C", "B", "A"]);
    }

    #[test]
    fn test_empty_value_is_treated_as_absent() {
        let snapshot: Snapshot = [("PORT", "")].into_iter().collect();
        let rules = rules(vec![(
            "PORT",
            rule(Severity::Recommended, None, Some("3000")),
        )]);

        let report = check(&snapshot, &rules).unwrap();
        assert_eq!(
            report.outcomes[0].status,
            OutcomeStatus::Defaulted {
                value: "3000".to_string()
            }
        );
    }

    #[test]
    fn test_empty_rules_produce_empty_report() {
        let snapshot: Snapshot = [("ANY", "set")].into_iter().collect();
        let report = check(&snapshot, &EffectiveRules::new()).unwrap();
        assert!(report.outcomes.is_empty());
        assert!(report.pending_defaults.is_empty());
    }

    #[test]
    fn test_outcome_serializes_with_flattened_status() {
        let outcome = VariableOutcome {
            name: "PORT".to_string(),
            status: OutcomeStatus::Defaulted {
                value: "3000".to_string(),
            },
            message: Some("msg".to_string()),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["name"], "PORT");
        assert_eq!(json["status"], "defaulted");
        assert_eq!(json["value"], "3000");
    }
}
