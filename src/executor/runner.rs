//! Test execution runner
//!
//! Runs one test of one suite on a fresh instance: the base is constructed,
//! `Before` runs, then the test body, then `After`. Any fault in that
//! sequence becomes a failing [`TestResult`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::fault::{catch, Fault, TestOutcome};
use crate::discovery;
use crate::models::{TestResult, TestSuiteResult};
use crate::output::{FailureRenderer, HtmlFailureRenderer};
use crate::registry::{SuiteDescriptor, SuiteInstance, SuiteRegistry};
use crate::suite::Environment;
use crate::utils::timer::Timer;

pub const BEFORE: &str = "Before";
pub const AFTER: &str = "After";

/// Caller-input errors of a run request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("Test suite not found: {0}")]
    SuiteNotFound(String),

    #[error("Test {test} not found in suite {suite}")]
    TestNotFound { suite: String, test: String },
}

/// When `After` runs relative to faults in `Before` or the test body
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterPolicy {
    /// Only after `Before` and the test body completed normally
    #[default]
    OnSuccess,
    /// After every attempt that got as far as a constructed instance
    Always,
}

impl AfterPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "on_success" | "on-success" | "success" => Some(AfterPolicy::OnSuccess),
            "always" => Some(AfterPolicy::Always),
            _ => None,
        }
    }
}

impl fmt::Display for AfterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AfterPolicy::OnSuccess => write!(f, "on_success"),
            AfterPolicy::Always => write!(f, "always"),
        }
    }
}

/// Test executor over a registry snapshot
pub struct TestExecutor {
    registry: SuiteRegistry,
    env: Environment,
    renderer: Box<dyn FailureRenderer>,
    after_policy: AfterPolicy,
}

impl TestExecutor {
    pub fn new(registry: SuiteRegistry, env: Environment) -> Self {
        Self {
            registry,
            env,
            renderer: Box::new(HtmlFailureRenderer),
            after_policy: AfterPolicy::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: impl FailureRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_after_policy(mut self, policy: AfterPolicy) -> Self {
        self.after_policy = policy;
        self
    }

    pub fn registry(&self) -> &SuiteRegistry {
        &self.registry
    }

    /// Run a single test
    pub fn run(&self, suite: &str, test: &str) -> Result<TestResult, RunError> {
        let descriptor = self
            .registry
            .find(suite)
            .ok_or_else(|| RunError::SuiteNotFound(suite.to_string()))?;

        if !discovery::is_test(descriptor, test) {
            return Err(RunError::TestNotFound {
                suite: suite.to_string(),
                test: test.to_string(),
            });
        }

        Ok(self.run_discovered(descriptor, test))
    }

    /// Run every test of one suite, in discovery order
    pub fn run_suite(&self, suite: &str) -> Result<TestSuiteResult, RunError> {
        let descriptor = self
            .registry
            .find(suite)
            .ok_or_else(|| RunError::SuiteNotFound(suite.to_string()))?;

        Ok(self.run_descriptor(descriptor))
    }

    /// Run every registered suite
    pub fn run_all(&self) -> Vec<TestSuiteResult> {
        self.registry
            .all()
            .iter()
            .map(|d| self.run_descriptor(d))
            .collect()
    }

    fn run_descriptor(&self, descriptor: &SuiteDescriptor) -> TestSuiteResult {
        let desc = discovery::describe(descriptor);
        info!("Running suite {} ({} tests)", desc.name, desc.tests.len());

        let results = desc
            .test_names()
            .map(|test| self.run_discovered(descriptor, test))
            .collect();

        let summary = TestSuiteResult::new(desc.name, results);
        info!(
            "Suite {} completed - Pass: {}/{}",
            summary.name,
            summary.passed_count(),
            summary.total()
        );
        summary
    }

    fn run_discovered(&self, descriptor: &SuiteDescriptor, test: &str) -> TestResult {
        info!("Running {}.{}", descriptor.name(), test);
        let timer = Timer::start(format!("{}.{}", descriptor.name(), test));

        let outcome = catch(|| {
            let mut instance = descriptor.instantiate(&self.env)?;
            self.run_lifecycle(instance.as_mut(), test)
        });

        let result = match outcome {
            Ok(()) => TestResult::pass(test),
            Err(fault) => {
                warn!("{}.{} failed: {}", descriptor.name(), test, fault);
                TestResult::fail(test, self.render(&fault))
            }
        };

        timer.stop();
        result
    }

    fn run_lifecycle(&self, instance: &mut dyn SuiteInstance, test: &str) -> TestOutcome {
        let body = catch(|| {
            call_hook(instance, BEFORE)?;
            debug!("Invoking {}", test);
            match instance.call(test) {
                Some(outcome) => outcome,
                None => Err(Fault::message(format!("method {test} is not callable"))),
            }
        });

        match (body, self.after_policy) {
            (Ok(()), _) => catch(|| call_hook(instance, AFTER)),
            (Err(fault), AfterPolicy::Always) => {
                if let Err(after) = catch(|| call_hook(instance, AFTER)) {
                    warn!("{} also failed after an earlier fault: {}", AFTER, after);
                }
                Err(fault)
            }
            (Err(fault), AfterPolicy::OnSuccess) => Err(fault),
        }
    }

    fn render(&self, fault: &Fault) -> String {
        match fault {
            Fault::Diagnostic(diagnostic) => self.renderer.render(diagnostic),
            Fault::Message(message) => self.renderer.render_message(message),
        }
    }
}

/// Invoke an optional lifecycle hook
fn call_hook(instance: &mut dyn SuiteInstance, hook: &str) -> TestOutcome {
    match instance.call(hook) {
        Some(outcome) => {
            debug!("Invoked {}", hook);
            outcome
        }
        None => Ok(()),
    }
}
