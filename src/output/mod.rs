//! Output formatting module
//!
//! Provides failure detail markup and the CLI output formats.

mod failure;
mod formatter;

pub use failure::{escape_html, FailureRenderer, HtmlFailureRenderer, TextFailureRenderer};
pub use formatter::{OutputFormat, ResultFormatter};
