//! Classification of package paths into logical modules

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical module a package belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Prometheus,
    ClientGolang,
    Adapter,
    Alertmanager,
    Other,
}

/// Ordered classification rules. First match wins; no match means `Other`.
const RULES: [(&str, Module); 4] = [
    ("/prometheus/prometheus/", Module::Prometheus),
    ("client_golang", Module::ClientGolang),
    ("prometheus-adapter", Module::Adapter),
    ("alertmanager", Module::Alertmanager),
];

impl Module {
    pub const ALL: [Module; 5] = [
        Module::Prometheus,
        Module::ClientGolang,
        Module::Adapter,
        Module::Alertmanager,
        Module::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Module::Prometheus => "prometheus",
            Module::ClientGolang => "client_golang",
            Module::Adapter => "adapter",
            Module::Alertmanager => "alertmanager",
            Module::Other => "other",
        }
    }

    /// Look up a module by its wire name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Module::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// Substring that identifies this module's packages. `Other` has none.
    pub fn pattern(self) -> Option<&'static str> {
        RULES
            .iter()
            .find(|(_, module)| *module == self)
            .map(|(pattern, _)| *pattern)
    }

    /// Whether `path` belongs to this module when filtering.
    ///
    /// `Other` matches paths that hit none of the named rules, which keeps
    /// filtering and [`classify`] in agreement.
    pub fn matches(self, path: &str) -> bool {
        match self.pattern() {
            Some(pattern) => path.contains(pattern),
            None => RULES.iter().all(|(pattern, _)| !path.contains(pattern)),
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a fully-qualified package path to its logical module.
pub fn classify(path: &str) -> Module {
    RULES
        .iter()
        .find(|(pattern, _)| path.contains(pattern))
        .map(|(_, module)| *module)
        .unwrap_or(Module::Other)
}
