//! # Preflight - Environment Variable Startup Validation
//!
//! Preflight validates a process's environment variables against a
//! declarative rule set before application startup, substituting default
//! values where the rules allow it and failing fast when a required variable
//! is missing.
//!
//! ## Overview
//!
//! A rule file (`.env.validate.yml` / `.yaml` / `.json`) declares the
//! variables an application expects, each with a severity (required or
//! recommended), an optional message, an optional default value, and the
//! environments the rule applies in. The `preflight` CLI checks the current
//! process environment against those rules and exits non-zero when startup
//! should not proceed.
//!
//! ## Core Concepts
//!
//! - **Active environment**: the deployment context (e.g. "development",
//!   "production") scoped rules are resolved against
//! - **Effective rule**: a variable's rule after flattening any
//!   per-environment overrides into the top-level descriptor
//! - **Pending defaults**: accepted default values, committed to the process
//!   environment only by an explicit apply step
//!
//! ## Modules
//!
//! - [`rules`] - Rule file model, parsing, and path resolution
//! - [`normalize`] - Flattens per-environment overrides into effective rules
//! - [`engine`] - Applies per-variable policy to an environment snapshot
//! - [`snapshot`] - Ordered capture of observed environment variables
//! - [`report`] - Colored console output and JSON rendering
//! - [`error`] - Typed fatal errors (malformed rules vs missing variables)
//!
//! ## Example
//!
//! ```
//! use preflight::engine;
//! use preflight::normalize::normalize;
//! use preflight::rules::RuleSet;
//! use preflight::snapshot::Snapshot;
//!
//! let rules = RuleSet::parse_yaml(
//!     r#"
//! PORT:
//!   severityLevel: 2
//!   defaultValue: "3000"
//!   env: [development]
//! "#,
//! )
//! .unwrap();
//!
//! let effective = normalize(&rules, "development").unwrap();
//! let report = engine::check(&Snapshot::new(), &effective).unwrap();
//!
//! assert_eq!(
//!     report.pending_defaults,
//!     vec![("PORT".to_string(), "3000".to_string())]
//! );
//! // report.apply_defaults() would commit PORT=3000 to the process env.
//! ```

pub mod engine;
pub mod error;
pub mod normalize;
pub mod report;
pub mod rules;
pub mod snapshot;

pub use engine::{check, CheckReport, OutcomeStatus, VariableOutcome};
pub use error::PreflightError;
pub use normalize::{normalize, EffectiveRule, EffectiveRules, Severity};
pub use rules::RuleSet;
pub use snapshot::Snapshot;

/// Name of the process variable consulted for the active environment when no
/// `--env` flag is given. Falls back to [`DEFAULT_ENVIRONMENT`] if unset.
pub const ENV_VAR: &str = "APP_ENV";

/// Active environment assumed when neither `--env` nor [`ENV_VAR`] is set.
pub const DEFAULT_ENVIRONMENT: &str = "development";
