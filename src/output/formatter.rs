//! Output formatters for listings and test results
//!
//! Provides JSON, Table, CSV and summary output formats.

use crate::models::{TestResult, TestStatus, TestSuiteDesc, TestSuiteResult};

/// Header row of result CSV output
const CSV_RESULT_HEADER: &str = "suite,test,status,error\n";

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::JsonPretty)
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> String {
        if self.format == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(value).unwrap_or_default()
        } else {
            serde_json::to_string(value).unwrap_or_default()
        }
    }

    /// Format the suite listing
    pub fn format_listing(&self, suites: &[TestSuiteDesc], detailed: bool) -> String {
        match self.format {
            OutputFormat::Json | OutputFormat::JsonPretty => self.to_json(&suites),
            OutputFormat::Csv => {
                let mut output = String::from("suite,test\n");
                for suite in suites {
                    for test in suite.test_names() {
                        output.push_str(&format!("{},{}\n", suite.name, test));
                    }
                }
                output
            }
            OutputFormat::Summary => {
                let tests: usize = suites.iter().map(|s| s.tests.len()).sum();
                format!("{} suites, {} tests", suites.len(), tests)
            }
            OutputFormat::Table => self.format_listing_table(suites, detailed),
        }
    }

    fn format_listing_table(&self, suites: &[TestSuiteDesc], detailed: bool) -> String {
        let total: usize = suites.iter().map(|s| s.tests.len()).sum();
        let mut output = String::new();

        output.push_str(&format!(
            "\nTest Suites ({} suites, {} tests)\n",
            suites.len(),
            total
        ));
        output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

        for suite in suites {
            output.push_str(&format!("\n{}:\n", suite.name));
            output.push_str("──────────────────────────────────────────────────────────────────────\n");
            if suite.is_empty() {
                output.push_str("  (no tests)\n");
            }
            for (i, test) in suite.test_names().enumerate() {
                if detailed {
                    output.push_str(&format!(
                        "  {:2}. {:30} [{}.{}]\n",
                        i + 1,
                        test,
                        suite.name,
                        test
                    ));
                } else {
                    output.push_str(&format!("  {:2}. {}\n", i + 1, test));
                }
            }
        }

        output.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        output
    }

    /// Format a single test result
    pub fn format_result(&self, result: &TestResult) -> String {
        match self.format {
            OutputFormat::Table => self.format_result_table(result),
            OutputFormat::Json | OutputFormat::JsonPretty => self.to_json(result),
            OutputFormat::Csv => self.format_result_csv(result),
            OutputFormat::Summary => format!("{} {}", result.status().symbol(), result.name),
        }
    }

    fn status_label(&self, status: TestStatus) -> &'static str {
        match (status, self.colorize) {
            (TestStatus::Pass, true) => "\x1b[32m✓ PASS\x1b[0m",
            (TestStatus::Fail, true) => "\x1b[31m✗ FAIL\x1b[0m",
            (TestStatus::Pass, false) => "✓ PASS",
            (TestStatus::Fail, false) => "✗ FAIL",
        }
    }

    fn format_result_table(&self, result: &TestResult) -> String {
        let mut output = format!("{:30} {}", result.name, self.status_label(result.status()));
        for line in result.error_html.lines() {
            output.push_str(&format!("\n      {line}"));
        }
        output
    }

    fn format_result_csv(&self, result: &TestResult) -> String {
        format!(
            "{},{},\"{}\"",
            result.name,
            result.status(),
            result.error_html.replace('"', "\"\"")
        )
    }

    /// Format one suite's results
    pub fn format_suite(&self, summary: &TestSuiteResult) -> String {
        match self.format {
            OutputFormat::Table => self.format_suite_table(summary),
            OutputFormat::Json | OutputFormat::JsonPretty => self.to_json(summary),
            OutputFormat::Csv => {
                let mut output = String::from(CSV_RESULT_HEADER);
                self.push_suite_csv_rows(&mut output, summary);
                output
            }
            OutputFormat::Summary => format!(
                "{}: {}/{} passed ({:.1}%)",
                summary.name,
                summary.passed_count(),
                summary.total(),
                summary.pass_rate()
            ),
        }
    }

    fn push_suite_csv_rows(&self, output: &mut String, summary: &TestSuiteResult) {
        for result in &summary.results {
            output.push_str(&summary.name);
            output.push(',');
            output.push_str(&self.format_result_csv(result));
            output.push('\n');
        }
    }

    fn format_suite_table(&self, summary: &TestSuiteResult) -> String {
        let mut output = String::new();

        output.push_str("\n╔══════════════════════════════════════════════════════════════╗\n");
        output.push_str(&format!("║  Suite {:54}║\n", summary.name));
        output.push_str("╚══════════════════════════════════════════════════════════════╝\n");

        for result in &summary.results {
            output.push_str(&format!("  {}\n", self.format_result_table(result)));
        }

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", summary.passed_count())
        } else {
            summary.passed_count().to_string()
        };
        let fail_str = if self.colorize && summary.failed_count() > 0 {
            format!("\x1b[31m{}\x1b[0m", summary.failed_count())
        } else {
            summary.failed_count().to_string()
        };

        output.push_str(&format!(
            "  Total: {} | Pass: {} | Fail: {} | Pass Rate: {:.1}%\n",
            summary.total(),
            pass_str,
            fail_str,
            summary.pass_rate()
        ));

        output
    }

    /// Format results of several suites
    pub fn format_suites(&self, summaries: &[TestSuiteResult]) -> String {
        match self.format {
            OutputFormat::Json | OutputFormat::JsonPretty => return self.to_json(&summaries),
            OutputFormat::Csv => {
                let mut output = String::from(CSV_RESULT_HEADER);
                for summary in summaries {
                    self.push_suite_csv_rows(&mut output, summary);
                }
                return output;
            }
            OutputFormat::Table | OutputFormat::Summary => {}
        }

        summaries
            .iter()
            .map(|s| self.format_suite(s))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
