//! Base test suite
//!
//! `TestSuite` is the base embedded in application suites. It carries an
//! HTTP client bound to the application under test, the last response
//! received, and assertions that fail with a located [`Diagnostic`].

use std::fmt::Debug;

use crate::config::AppConfig;
use crate::executor::Diagnostic;
use crate::http::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::registry::BaseSuite;

/// Execution environment handed to base-suite constructors
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Environment {
    /// Base URL of the application under test
    pub base_url: String,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Environment {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl From<&AppConfig> for Environment {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// Shared test-support state for application suites
#[derive(Debug)]
pub struct TestSuite {
    client: HttpClient,
    response: Option<HttpResponse>,
}

impl BaseSuite for TestSuite {
    const NAME: &'static str = "TestSuite";

    const METHODS: &'static [&'static str] = &[
        "BaseUrl",
        "Response",
        "Get",
        "Post",
        "PostForm",
        "MakeRequest",
        "Assert",
        "AssertEqual",
        "AssertOk",
        "AssertNotFound",
        "AssertStatus",
        "AssertContentType",
        "AssertContains",
    ];

    fn construct(env: &Environment) -> anyhow::Result<Self> {
        Ok(Self::new(env)?)
    }
}

impl TestSuite {
    pub fn new(env: &Environment) -> Result<Self, HttpError> {
        Ok(Self {
            client: HttpClient::new(&env.base_url, env.timeout_secs)?,
            response: None,
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Last response received, if any request was made
    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }

    #[track_caller]
    pub fn get(&mut self, path: &str) -> Result<(), Diagnostic> {
        self.make_request(HttpRequest::get(path))
    }

    #[track_caller]
    pub fn post(&mut self, path: &str, content_type: &str, body: &str) -> Result<(), Diagnostic> {
        self.make_request(
            HttpRequest::post(path)
                .header("Content-Type", content_type)
                .body(body),
        )
    }

    #[track_caller]
    pub fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> Result<(), Diagnostic> {
        self.make_request(HttpRequest::post(path).form(fields.iter().copied()))
    }

    /// Send `request` and keep the response for later assertions
    #[track_caller]
    pub fn make_request(&mut self, request: HttpRequest) -> Result<(), Diagnostic> {
        self.response = None;
        match self.client.send(request) {
            Ok(response) => {
                self.response = Some(response);
                Ok(())
            }
            Err(e) => Err(Diagnostic::here("Request Failed", e.to_string())),
        }
    }

    #[track_caller]
    pub fn assert(&self, condition: bool) -> Result<(), Diagnostic> {
        if condition {
            Ok(())
        } else {
            Err(Diagnostic::here("Assertion Failed", "condition was false"))
        }
    }

    #[track_caller]
    pub fn assert_equal<T>(&self, expected: T, actual: T) -> Result<(), Diagnostic>
    where
        T: PartialEq + Debug,
    {
        if expected == actual {
            Ok(())
        } else {
            Err(Diagnostic::here(
                "Assertion Failed",
                format!("expected {expected:?}, got {actual:?}"),
            ))
        }
    }

    #[track_caller]
    pub fn assert_ok(&self) -> Result<(), Diagnostic> {
        self.assert_status(200)
    }

    #[track_caller]
    pub fn assert_not_found(&self) -> Result<(), Diagnostic> {
        self.assert_status(404)
    }

    #[track_caller]
    pub fn assert_status(&self, status: u16) -> Result<(), Diagnostic> {
        let response = self.last_response()?;
        if response.status_code == status {
            Ok(())
        } else {
            Err(Diagnostic::here(
                "Assertion Failed",
                format!("expected status {status}, got {}", response.status_code),
            ))
        }
    }

    #[track_caller]
    pub fn assert_content_type(&self, content_type: &str) -> Result<(), Diagnostic> {
        let response = self.last_response()?;
        match response.content_type() {
            Some(actual) if actual == content_type => Ok(()),
            actual => Err(Diagnostic::here(
                "Assertion Failed",
                format!(
                    "expected content type {content_type}, got {}",
                    actual.unwrap_or("none")
                ),
            )),
        }
    }

    #[track_caller]
    pub fn assert_contains(&self, text: &str) -> Result<(), Diagnostic> {
        let response = self.last_response()?;
        if response.body_contains(text) {
            Ok(())
        } else {
            Err(Diagnostic::here(
                "Assertion Failed",
                format!("response body does not contain {text:?}"),
            ))
        }
    }

    #[track_caller]
    fn last_response(&self) -> Result<&HttpResponse, Diagnostic> {
        match &self.response {
            Some(response) => Ok(response),
            None => Err(Diagnostic::here("No Response", "no request has been made")),
        }
    }
}
