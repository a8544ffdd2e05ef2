//! Rule file model and loading.
//!
//! A rule file declares the environment variables an application expects,
//! one entry per variable name:
//!
//! ```yaml
//! DB_HOST:
//!   severityLevel: 1
//!   env: [production, staging]
//! PORT:
//!   severityLevel: 2
//!   defaultValue: "3000"
//!   env:
//!     development:
//!       message: "PORT unset, using the dev default"
//! ```
//!
//! Rule files are YAML or JSON, selected by extension. Declaration order is
//! preserved so validation output follows the file top to bottom.

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File names probed, in order, when no explicit rule file path is given.
pub const DEFAULT_RULE_FILES: [&str; 3] = [
    ".env.validate.yml",
    ".env.validate.yaml",
    ".env.validate.json",
];

/// The full set of declared variables, in declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(pub IndexMap<String, Rule>);

/// One declared variable's rule, as written in the rule file.
///
/// `severityLevel` stays a raw integer here; whether it resolves to a valid
/// severity is the normalizer's call, after any per-environment override.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    #[serde(default, rename = "severityLevel")]
    pub severity_level: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "defaultValue")]
    pub default_value: Option<String>,
    pub env: EnvScope,
}

/// The `env` field of a rule: which environments the rule applies to.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EnvScope {
    /// A list of environment names the rule applies in.
    Environments(Vec<String>),
    /// Per-environment overrides; the rule applies when the active
    /// environment is a key, and that entry's fields win over the top level.
    Overrides(IndexMap<String, ScopeOverride>),
    /// Anything else. Kept so the normalizer can reject it with a
    /// path-qualified error instead of a bare deserialization failure.
    Other(serde_json::Value),
}

/// Fields a per-environment entry may override. Unset fields fall back to
/// the rule's top-level values (whole-field replacement, no merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeOverride {
    #[serde(default, rename = "severityLevel")]
    pub severity_level: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "defaultValue")]
    pub default_value: Option<String>,
}

impl RuleSet {
    /// Load a rule file, choosing YAML or JSON by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule file {}", path.display()))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::parse_json(&content)
                .with_context(|| format!("Failed to parse rule file {}", path.display())),
            _ => Self::parse_yaml(&content)
                .with_context(|| format!("Failed to parse rule file {}", path.display())),
        }
    }

    pub fn parse_yaml(content: &str) -> Result<Self> {
        let rules: RuleSet =
            serde_yaml::from_str(content).context("Rule file is not a mapping of variable rules")?;
        Ok(rules)
    }

    pub fn parse_json(content: &str) -> Result<Self> {
        let rules: RuleSet =
            serde_json::from_str(content).context("Rule file is not a mapping of variable rules")?;
        Ok(rules)
    }

    /// Probe `dir` for the default rule file names, in order.
    ///
    /// Fails with a message listing every probed name so a missing file is
    /// distinguishable from a malformed one.
    pub fn resolve_default_path(dir: &Path) -> Result<PathBuf> {
        for name in DEFAULT_RULE_FILES {
            let candidate = dir.join(name);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
        bail!(
            "No rule file found in {} (looked for {})",
            dir.display(),
            DEFAULT_RULE_FILES.join(", ")
        );
    }

    /// Every environment name referenced by any rule's scope, in first-seen
    /// order, without duplicates. Used by `preflight lint` to normalize the
    /// file against each environment it mentions.
    pub fn environments(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for rule in self.0.values() {
            let names: Vec<&String> = match &rule.env {
                EnvScope::Environments(list) => list.iter().collect(),
                EnvScope::Overrides(overrides) => overrides.keys().collect(),
                EnvScope::Other(_) => Vec::new(),
            };
            for name in names {
                if !seen.contains(name) {
                    seen.push(name.clone());
                }
            }
        }
        seen
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
