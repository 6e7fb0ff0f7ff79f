//! Data models shared by discovery, execution and rendering
//!
//! This module contains the suite descriptions produced by discovery and the
//! results produced by the executor.

mod suite;
mod test_result;

pub use suite::{TestDesc, TestSuiteDesc};
pub use test_result::{TestResult, TestStatus, TestSuiteResult};
