//! Smoke tests against the application under test

use crate::executor::Diagnostic;
use crate::registry::{MethodTable, Suite};
use crate::suite::TestSuite;

/// Path no application is expected to serve
const MISSING_PATH: &str = "/__testrunner/missing";

pub struct SmokeTest {
    suite: TestSuite,
}

impl SmokeTest {
    fn test_index_responds(&mut self) -> Result<(), Diagnostic> {
        self.suite.get("/")?;
        self.suite.assert_ok()?;
        self.suite.assert_content_type("text/html")
    }

    fn test_unknown_route_is_not_found(&mut self) -> Result<(), Diagnostic> {
        self.suite.get(MISSING_PATH)?;
        self.suite.assert_not_found()
    }
}

impl Suite for SmokeTest {
    type Base = TestSuite;
    const NAME: &'static str = "SmokeTest";

    fn with_base(suite: TestSuite) -> Self {
        Self { suite }
    }

    fn methods(table: &mut MethodTable<Self>) {
        table
            .method("TestIndexResponds", Self::test_index_responds)
            .method("TestUnknownRouteIsNotFound", Self::test_unknown_route_is_not_found)
            .helper("FetchPath", 1, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery;
    use crate::executor::TestExecutor;
    use crate::registry::SuiteDescriptor;
    use crate::suite::Environment;
    use std::net::TcpListener;

    #[test]
    fn test_smoke_suite_discovery() {
        let desc = discovery::describe(&SuiteDescriptor::of::<SmokeTest>());
        assert_eq!(
            desc.test_names().collect::<Vec<_>>(),
            vec!["TestIndexResponds", "TestUnknownRouteIsNotFound"]
        );
    }

    #[test]
    fn test_unreachable_app_fails_with_request_diagnostic() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let executor = TestExecutor::new(
            crate::suites::registry(),
            Environment::new(base_url).with_timeout(2),
        );
        let result = executor.run("SmokeTest", "TestIndexResponds").unwrap();
        assert!(!result.passed);
        assert!(result.error_html.contains("Request Failed"));
        assert!(result.error_html.contains("src/suites/smoke.rs"));
    }
}
