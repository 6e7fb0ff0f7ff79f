//! Listing and run surfaces
//!
//! Structured responses consumed by the interactive UI and the command-line
//! client. Both callers get the same data; only serialization differs.

use serde::{Deserialize, Serialize};

use crate::discovery;
use crate::executor::{RunError, TestExecutor};
use crate::models::{TestResult, TestSuiteDesc};
use crate::registry::SuiteRegistry;

/// Outcome of a run request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Outcome")]
pub enum RunResponse {
    Completed(TestResult),
    SuiteNotFound {
        #[serde(rename = "Suite")]
        suite: String,
    },
    TestNotFound {
        #[serde(rename = "Suite")]
        suite: String,
        #[serde(rename = "Test")]
        test: String,
    },
}

impl RunResponse {
    /// Whether a test ran and passed
    pub fn is_pass(&self) -> bool {
        matches!(self, RunResponse::Completed(result) if result.passed)
    }
}

impl From<Result<TestResult, RunError>> for RunResponse {
    fn from(result: Result<TestResult, RunError>) -> Self {
        match result {
            Ok(result) => RunResponse::Completed(result),
            Err(RunError::SuiteNotFound(suite)) => RunResponse::SuiteNotFound { suite },
            Err(RunError::TestNotFound { suite, test }) => RunResponse::TestNotFound { suite, test },
        }
    }
}

/// Every registered suite with its tests
pub fn list(registry: &SuiteRegistry) -> Vec<TestSuiteDesc> {
    discovery::list(registry)
}

pub fn list_json(registry: &SuiteRegistry) -> serde_json::Result<String> {
    serde_json::to_string(&list(registry))
}

/// Run one test and describe the outcome
pub fn run(executor: &TestExecutor, suite: &str, test: &str) -> RunResponse {
    executor.run(suite, test).into()
}

pub fn run_json(executor: &TestExecutor, suite: &str, test: &str) -> serde_json::Result<String> {
    serde_json::to_string(&run(executor, suite, test))
}
