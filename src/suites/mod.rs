//! Suites bundled with the `testrunner` binary
//!
//! ## Smoke Tests
//! - Index page responds with 200 and HTML
//! - Unknown routes respond with 404

mod smoke;

pub use smoke::SmokeTest;

use crate::registry::{self, SuiteRegistry};

/// Register the bundled suites in the process-wide registry
pub fn register_all() {
    registry::register::<SmokeTest>();
}

/// Registry holding only the bundled suites
pub fn registry() -> SuiteRegistry {
    let mut registry = SuiteRegistry::new();
    registry.register::<SmokeTest>();
    registry
}
