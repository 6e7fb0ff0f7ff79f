//! Test result models
//!
//! Defines single-test results and the per-suite aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Test execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✓",
            TestStatus::Fail => "✗",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Pass)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// Result of a single test execution
///
/// `error_html` is markup: either the output of a failure renderer or the
/// escaped text of a plain fault. It is empty when the test passed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub error_html: String,
}

impl TestResult {
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            error_html: String::new(),
        }
    }

    pub fn fail(name: impl Into<String>, error_html: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            error_html: error_html.into(),
        }
    }

    pub fn status(&self) -> TestStatus {
        if self.passed {
            TestStatus::Pass
        } else {
            TestStatus::Fail
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.status().symbol(), self.name, self.status())
    }
}

/// Results of every test in one suite, in discovery order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestSuiteResult {
    pub name: String,
    pub passed: bool,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn new(name: impl Into<String>, results: Vec<TestResult>) -> Self {
        let passed = results.iter().all(|r| r.passed);
        Self {
            name: name.into(),
            passed,
            results,
        }
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    pub fn pass_rate(&self) -> f64 {
        if self.results.is_empty() {
            0.0
        } else {
            (self.passed_count() as f64 / self.total() as f64) * 100.0
        }
    }
}

impl fmt::Display for TestSuiteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Suite {}", self.name)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Pass Rate: {:.1}%",
            self.total(),
            self.passed_count(),
            self.failed_count(),
            self.pass_rate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_creation() {
        let result = TestResult::pass("TestHome");
        assert!(result.status().is_success());
        assert!(result.error_html.is_empty());

        let result = TestResult::fail("TestBroken", "not implemented");
        assert_eq!(result.status(), TestStatus::Fail);
        assert_eq!(result.error_html, "not implemented");
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_value(TestResult::pass("TestHome")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Name": "TestHome", "Passed": true, "ErrorHtml": ""})
        );
    }

    #[test]
    fn test_suite_result_aggregate() {
        let results = vec![
            TestResult::pass("TestHome"),
            TestResult::fail("TestBroken", "boom"),
        ];

        let summary = TestSuiteResult::new("AppTest", results);
        assert!(!summary.passed);
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.passed_count(), 1);
        assert_eq!(summary.failed_count(), 1);
        assert!((summary.pass_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_suite_result_passes() {
        let summary = TestSuiteResult::new("EmptyTest", Vec::new());
        assert!(summary.passed);
        assert_eq!(summary.pass_rate(), 0.0);
    }
}
