//! Environment snapshot: the observed variables a run validates against.
//!
//! Captured once per run and never mutated by the engine. Defaults accepted
//! during validation are committed to the process-wide environment in a
//! separate, explicit step (`CheckReport::apply_defaults`), never here.

use indexmap::IndexMap;

/// Ordered mapping from variable name to observed value.
#[derive(Debug, Clone, Default)]
pub struct Snapshot(IndexMap<String, String>);

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    pub fn from_process_env() -> Self {
        std::env::vars().collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether `name` counts as present. An empty value counts as unset,
    /// matching how dotenv-style tooling treats `NAME=` lines.
    pub fn contains(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(|value| !value.is_empty())
    }
}

impl FromIterator<(String, String)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Snapshot(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        Snapshot(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}
