//! Suite and test descriptions
//!
//! Built fresh on every listing request; field names on the wire follow the
//! runner's established JSON format (`Name`, `Tests`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single discovered test method
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestDesc {
    pub name: String,
}

impl TestDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A registered suite and the tests discovered on it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestSuiteDesc {
    pub name: String,
    pub tests: Vec<TestDesc>,
}

impl TestSuiteDesc {
    pub fn new(name: impl Into<String>, tests: Vec<TestDesc>) -> Self {
        Self {
            name: name.into(),
            tests,
        }
    }

    /// Test names in discovery order
    pub fn test_names(&self) -> impl Iterator<Item = &str> {
        self.tests.iter().map(|t| t.name.as_str())
    }

    pub fn contains(&self, test: &str) -> bool {
        self.tests.iter().any(|t| t.name == test)
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl fmt::Display for TestSuiteDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} tests)", self.name, self.tests.len())
    }
}
