//! HTTP client module for the base test suite
//!
//! Provides the request plumbing behind the `TestSuite` request helpers.

mod client;

pub use client::{HttpClient, HttpError, HttpRequest, HttpResponse};
