//! Specification normalizer: flattens per-environment overrides.
//!
//! Given the raw rule set and the active environment name, produces one
//! effective rule per variable that applies in that environment. Rules scoped
//! to other environments are dropped entirely; they contribute no outcome and
//! no default.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::error::PreflightError;
use crate::rules::{EnvScope, RuleSet};

/// Policy tier for a declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Missing with no default is fatal to startup (`severityLevel: 1`).
    Required,
    /// Missing with no default is advisory only (`severityLevel: 2`).
    Recommended,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Required => write!(f, "required"),
            Severity::Recommended => write!(f, "recommended"),
        }
    }
}

/// A variable's rule after scope resolution: the triple the engine consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveRule {
    pub severity: Severity,
    pub message: Option<String>,
    pub default_value: Option<String>,
}

/// Effective rules in rule-file declaration order.
pub type EffectiveRules = IndexMap<String, EffectiveRule>;

/// Resolve the effective rule for every variable that applies in
/// `active_env`, preserving declaration order.
///
/// Nested per-environment fields always win over top-level fields of the
/// same variable; replacement is whole-field, never a merge within a field.
pub fn normalize(rules: &RuleSet, active_env: &str) -> Result<EffectiveRules, PreflightError> {
    let mut effective = EffectiveRules::new();

    for (name, rule) in &rules.0 {
        let (severity_level, message, default_value) = match &rule.env {
            EnvScope::Environments(environments) => {
                if !environments.iter().any(|e| e == active_env) {
                    continue;
                }
                (
                    rule.severity_level,
                    rule.message.clone(),
                    rule.default_value.clone(),
                )
            }
            EnvScope::Overrides(overrides) => {
                let Some(over) = overrides.get(active_env) else {
                    continue;
                };
                (
                    over.severity_level.or(rule.severity_level),
                    over.message.clone().or_else(|| rule.message.clone()),
                    over.default_value
                        .clone()
                        .or_else(|| rule.default_value.clone()),
                )
            }
            EnvScope::Other(_) => {
                return Err(PreflightError::InvalidRule {
                    path: format!("{}.env", name),
                    reason: "must be array or object".to_string(),
                });
            }
        };

        let severity = match severity_level {
            Some(1) => Severity::Required,
            Some(2) => Severity::Recommended,
            _ => {
                return Err(PreflightError::InvalidRule {
                    path: format!("{}.severityLevel", name),
                    reason: "must resolve to 1 or 2".to_string(),
                });
            }
        };

        effective.insert(
            name.clone(),
            EffectiveRule {
                severity,
                message,
                default_value,
            },
        );
    }

    Ok(effective)
}
