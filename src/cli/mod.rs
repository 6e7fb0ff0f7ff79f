//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Test suite discovery and execution harness
#[derive(Parser, Debug)]
#[command(name = "testrunner")]
#[command(version)]
#[command(about = "List and run registered test suites")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Path to a configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Base URL of the application under test
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Run After even when Before or the test body fails
    #[arg(long, global = true)]
    pub after_always: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered suites and their tests
    List(ListArgs),

    /// Run a single test
    Run(RunArgs),

    /// Run every test of one suite
    Suite(SuiteArgs),

    /// Run every registered suite
    All,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show fully qualified test names
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Suite type name, e.g. SmokeTest
    pub suite: String,

    /// Test method name, e.g. TestIndexResponds
    pub test: String,
}

/// Arguments for suite command
#[derive(Parser, Debug)]
pub struct SuiteArgs {
    /// Suite type name
    pub suite: String,
}
