//! Faults raised by suite code
//!
//! A fault is either a structured [`Diagnostic`] or the plain text of an
//! error or panic. Test bodies report faults by returning them or by
//! panicking; [`catch`] turns both into a [`TestOutcome`].

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe, Location};
use thiserror::Error;

/// Lines of source shown either side of the failing line
const CONTEXT_LINES: u32 = 3;

pub type TestOutcome = Result<(), Fault>;

/// A line of source code shown alongside a diagnostic
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLine {
    pub number: u32,
    pub text: String,
    pub is_error: bool,
}

/// Structured failure information
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{title}: {description}")]
pub struct Diagnostic {
    pub title: String,
    pub description: String,
    pub path: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub source_lines: Vec<SourceLine>,
}

impl Diagnostic {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            path: None,
            line: None,
            column: None,
            source_lines: Vec::new(),
        }
    }

    /// Diagnostic located at the caller, with surrounding source when readable
    #[track_caller]
    pub fn here(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description)
            .at(Location::caller())
            .with_source_context()
    }

    pub fn at(mut self, location: &Location<'_>) -> Self {
        self.path = Some(location.file().to_string());
        self.line = Some(location.line());
        self.column = Some(location.column());
        self
    }

    /// Load the lines around `line` from `path`. Missing files are ignored.
    ///
    /// Best-effort only: a relative `path` (as recorded by `file!()`) is read
    /// from the current working directory, so the context is only accurate when
    /// the process runs from the root of the crate that defines the suite.
    pub fn with_source_context(mut self) -> Self {
        let (Some(path), Some(line)) = (self.path.as_deref(), self.line) else {
            return self;
        };
        let Ok(content) = std::fs::read_to_string(path) else {
            return self;
        };

        let first = line.saturating_sub(CONTEXT_LINES).max(1);
        let last = line.saturating_add(CONTEXT_LINES);
        self.source_lines = content
            .lines()
            .zip(1u32..)
            .filter(|(_, n)| (first..=last).contains(n))
            .map(|(text, number)| SourceLine {
                number,
                text: text.to_string(),
                is_error: number == line,
            })
            .collect();
        self
    }

    /// `path:line` when the location is known
    pub fn location(&self) -> Option<String> {
        match (&self.path, self.line) {
            (Some(path), Some(line)) => Some(format!("{path}:{line}")),
            (Some(path), None) => Some(path.clone()),
            _ => None,
        }
    }
}

/// A fault raised while running suite code
#[derive(Debug, Error)]
pub enum Fault {
    #[error(transparent)]
    Diagnostic(Box<Diagnostic>),

    #[error("{0}")]
    Message(String),
}

impl Fault {
    pub fn message(text: impl fmt::Display) -> Self {
        Fault::Message(text.to_string())
    }

    /// Convert a panic payload, recognising `Diagnostic` and `Fault` payloads
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<Diagnostic>() {
            Ok(diagnostic) => return Fault::Diagnostic(diagnostic),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<Fault>() {
            Ok(fault) => return *fault,
            Err(payload) => payload,
        };

        if let Some(s) = payload.downcast_ref::<&str>() {
            Fault::Message(s.to_string())
        } else if let Some(s) = payload.downcast_ref::<String>() {
            Fault::Message(s.clone())
        } else {
            Fault::Message("Unknown panic".to_string())
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Fault::Diagnostic(d) => Some(d),
            Fault::Message(_) => None,
        }
    }
}

impl From<Diagnostic> for Fault {
    fn from(diagnostic: Diagnostic) -> Self {
        Fault::Diagnostic(Box::new(diagnostic))
    }
}

impl From<String> for Fault {
    fn from(text: String) -> Self {
        Fault::Message(text)
    }
}

impl From<&str> for Fault {
    fn from(text: &str) -> Self {
        Fault::Message(text.to_string())
    }
}

impl From<anyhow::Error> for Fault {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<Diagnostic>() {
            Ok(diagnostic) => diagnostic.into(),
            Err(err) => Fault::Message(format!("{err:#}")),
        }
    }
}

/// Return types accepted from suite methods
pub trait IntoOutcome {
    fn into_outcome(self) -> TestOutcome;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> TestOutcome {
        Ok(())
    }
}

impl<E: Into<Fault>> IntoOutcome for Result<(), E> {
    fn into_outcome(self) -> TestOutcome {
        self.map_err(Into::into)
    }
}

/// Run `f`, converting a panic into a fault
pub fn catch<F>(f: F) -> TestOutcome
where
    F: FnOnce() -> TestOutcome,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(outcome) => outcome,
        Err(payload) => Err(Fault::from_panic(payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catch_str_panic() {
        let outcome = catch(|| panic!("boom"));
        match outcome {
            Err(Fault::Message(msg)) => assert_eq!(msg, "boom"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_catch_formatted_panic() {
        let code = 7;
        let outcome = catch(|| panic!("exit code {code}"));
        assert_eq!(outcome.unwrap_err().to_string(), "exit code 7");
    }

    #[test]
    fn test_catch_diagnostic_panic() {
        let outcome = catch(|| {
            std::panic::panic_any(Diagnostic::new("Assertion Failed", "expected 1"))
        });
        let fault = outcome.unwrap_err();
        let diagnostic = fault.diagnostic().expect("structured payload");
        assert_eq!(diagnostic.title, "Assertion Failed");
    }

    #[test]
    fn test_catch_unknown_payload() {
        let outcome = catch(|| std::panic::panic_any(42_u8));
        assert_eq!(outcome.unwrap_err().to_string(), "Unknown panic");
    }

    #[test]
    fn test_catch_passes_through_ok() {
        assert!(catch(|| Ok(())).is_ok());
    }

    #[test]
    fn test_anyhow_wrapping_diagnostic_stays_structured() {
        let err = anyhow::Error::new(Diagnostic::new("Request Failed", "refused"));
        let fault = Fault::from(err);
        assert!(fault.diagnostic().is_some());

        let fault = Fault::from(anyhow::anyhow!("plain"));
        assert!(matches!(fault, Fault::Message(ref m) if m == "plain"));
    }

    #[test]
    fn test_into_outcome() {
        assert!(().into_outcome().is_ok());
        let failed: Result<(), &str> = Err("nope");
        assert_eq!(failed.into_outcome().unwrap_err().to_string(), "nope");
    }

    #[test]
    fn test_diagnostic_here_records_location() {
        let diagnostic = Diagnostic::here("Assertion Failed", "x");
        assert_eq!(diagnostic.path.as_deref(), Some(file!()));
        assert!(diagnostic.line.is_some());
        assert!(diagnostic.location().unwrap().starts_with(file!()));
    }

    #[test]
    fn test_source_context_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        for n in 1..=10 {
            writeln!(file, "line {n}").unwrap();
        }

        let mut diagnostic = Diagnostic::new("t", "d");
        diagnostic.path = Some(file.path().display().to_string());
        diagnostic.line = Some(2);
        let diagnostic = diagnostic.with_source_context();

        let numbers: Vec<u32> = diagnostic.source_lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert!(diagnostic.source_lines[1].is_error);
        assert_eq!(diagnostic.source_lines[1].text, "line 2");
    }

    #[test]
    fn test_source_context_line_past_end_of_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write;
        writeln!(file, "only line").unwrap();

        let mut diagnostic = Diagnostic::new("t", "d");
        diagnostic.path = Some(file.path().display().to_string());
        diagnostic.line = Some(u32::MAX);
        assert!(diagnostic.with_source_context().source_lines.is_empty());
    }

    #[test]
    fn test_source_context_missing_file() {
        let mut diagnostic = Diagnostic::new("t", "d");
        diagnostic.path = Some("/nonexistent/file.rs".to_string());
        diagnostic.line = Some(2);
        assert!(diagnostic.with_source_context().source_lines.is_empty());
    }
}
