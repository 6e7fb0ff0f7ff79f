//! Test suite discovery and execution harness
//!
//! Suites register themselves with a [`registry::SuiteRegistry`] by declaring
//! their methods in a [`registry::MethodTable`]. Discovery lists the methods
//! that qualify as tests; the executor runs one test at a time on a fresh
//! instance, with `Before`/`After` hooks, and turns any fault into a
//! structured result.
//!
//! ```ignore
//! use testrunner::registry::{MethodTable, Suite};
//! use testrunner::suite::TestSuite;
//!
//! struct AppTest {
//!     suite: TestSuite,
//! }
//!
//! impl AppTest {
//!     fn test_home(&mut self) -> Result<(), testrunner::executor::Diagnostic> {
//!         self.suite.get("/")?;
//!         self.suite.assert_ok()
//!     }
//! }
//!
//! impl Suite for AppTest {
//!     type Base = TestSuite;
//!     const NAME: &'static str = "AppTest";
//!
//!     fn with_base(suite: TestSuite) -> Self {
//!         Self { suite }
//!     }
//!
//!     fn methods(table: &mut MethodTable<Self>) {
//!         table.method("TestHome", Self::test_home);
//!     }
//! }
//! ```

pub mod api;
pub mod config;
pub mod discovery;
pub mod executor;
pub mod http;
pub mod models;
pub mod output;
pub mod registry;
pub mod suite;
pub mod suites;
pub mod utils;

#[cfg(test)]
mod fixtures;
