//! Failure detail rendering
//!
//! Turns a structured [`Diagnostic`] into markup for the failure detail view,
//! or into plain text for terminal output.

use std::fmt::Write;

use crate::executor::Diagnostic;

/// Renders structured diagnostics into failure detail markup
pub trait FailureRenderer: Send + Sync {
    fn render(&self, diagnostic: &Diagnostic) -> String;

    /// Render the text of an unstructured fault
    fn render_message(&self, message: &str) -> String {
        escape_html(message)
    }
}

/// Default renderer producing an HTML fragment
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlFailureRenderer;

impl FailureRenderer for HtmlFailureRenderer {
    fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut html = String::new();

        html.push_str("<div class=\"failure-detail\">\n");
        let _ = writeln!(html, "  <h3>{}</h3>", escape_html(&diagnostic.title));
        let _ = writeln!(
            html,
            "  <p class=\"description\">{}</p>",
            escape_html(&diagnostic.description)
        );

        if let Some(path) = &diagnostic.path {
            match diagnostic.line {
                Some(line) => {
                    let _ = writeln!(
                        html,
                        "  <p class=\"location\">In {} (around line {line})</p>",
                        escape_html(path)
                    );
                }
                None => {
                    let _ = writeln!(html, "  <p class=\"location\">In {}</p>", escape_html(path));
                }
            }
        }

        if !diagnostic.source_lines.is_empty() {
            html.push_str("  <pre class=\"source\">\n");
            for line in &diagnostic.source_lines {
                let class = if line.is_error { "line error" } else { "line" };
                let _ = writeln!(
                    html,
                    "<span class=\"{class}\"><span class=\"lineno\">{:>4}:</span> {}</span>",
                    line.number,
                    escape_html(&line.text)
                );
            }
            html.push_str("  </pre>\n");
        }

        html.push_str("</div>\n");
        html
    }
}

/// Plain-text renderer for terminal output
#[derive(Clone, Copy, Debug, Default)]
pub struct TextFailureRenderer;

impl FailureRenderer for TextFailureRenderer {
    fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut text = format!("{}: {}", diagnostic.title, diagnostic.description);

        if let Some(location) = diagnostic.location() {
            let _ = write!(text, "\n  at {location}");
        }
        for line in &diagnostic.source_lines {
            let marker = if line.is_error { '>' } else { ' ' };
            let _ = write!(text, "\n  {marker} {:>4} | {}", line.number, line.text);
        }

        text
    }

    fn render_message(&self, message: &str) -> String {
        message.to_string()
    }
}

/// Escape the five HTML special characters
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::SourceLine;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("boom"), "boom");
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&#34;x&#34;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_full_diagnostic() {
        let diagnostic = Diagnostic {
            title: "Assertion Failed".to_string(),
            description: "expected <200>".to_string(),
            path: Some("src/app_test.rs".to_string()),
            line: Some(12),
            column: Some(5),
            source_lines: vec![
                SourceLine {
                    number: 11,
                    text: "fn test_home(&mut self) {".to_string(),
                    is_error: false,
                },
                SourceLine {
                    number: 12,
                    text: "    self.assert_ok()?;".to_string(),
                    is_error: true,
                },
            ],
        };

        let html = HtmlFailureRenderer.render(&diagnostic);
        assert!(html.contains("<h3>Assertion Failed</h3>"));
        assert!(html.contains("expected &lt;200&gt;"));
        assert!(html.contains("In src/app_test.rs (around line 12)"));
        assert!(html.contains("<span class=\"line error\"><span class=\"lineno\">  12:</span>"));
        assert!(html.contains("fn test_home(&amp;mut self) {"));
    }

    #[test]
    fn test_text_renderer() {
        let mut diagnostic = Diagnostic::new("Assertion Failed", "expected <200>");
        diagnostic.path = Some("src/app_test.rs".to_string());
        diagnostic.line = Some(12);
        diagnostic.source_lines = vec![
            SourceLine {
                number: 11,
                text: "fn test_home(&mut self) {".to_string(),
                is_error: false,
            },
            SourceLine {
                number: 12,
                text: "    self.assert_ok()?;".to_string(),
                is_error: true,
            },
        ];

        assert_eq!(
            TextFailureRenderer.render(&diagnostic),
            "Assertion Failed: expected <200>\n\
             \x20 at src/app_test.rs:12\n\
             \x20     11 | fn test_home(&mut self) {\n\
             \x20 >   12 |     self.assert_ok()?;"
        );
        assert_eq!(TextFailureRenderer.render_message("a & b"), "a & b");
        assert_eq!(HtmlFailureRenderer.render_message("a & b"), "a &amp; b");
    }

    #[test]
    fn test_render_without_location() {
        let html = HtmlFailureRenderer.render(&Diagnostic::new("Request Failed", "refused"));
        assert!(html.contains("<h3>Request Failed</h3>"));
        assert!(!html.contains("class=\"location\""));
        assert!(!html.contains("<pre"));
    }
}
