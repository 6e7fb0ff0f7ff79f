//! Test execution engine
//!
//! Runs single tests in isolation and converts faults into results.

mod fault;
mod runner;

pub use fault::{catch, Diagnostic, Fault, IntoOutcome, SourceLine, TestOutcome};
pub use runner::{AfterPolicy, RunError, TestExecutor, AFTER, BEFORE};
