//! testrunner - test suite discovery and execution harness
//!
//! ## Usage
//!
//! ```bash
//! # List suites and tests
//! testrunner list
//!
//! # Machine-readable listing
//! testrunner list --format json
//!
//! # Run a single test
//! testrunner run SmokeTest TestIndexResponds --base-url http://localhost:9000
//!
//! # Run a whole suite, or everything
//! testrunner suite SmokeTest
//! testrunner all --format summary
//! ```

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info};

mod cli;

use cli::Args;
use testrunner::api::{self, RunResponse};
use testrunner::config::{AppConfig, EnvConfig};
use testrunner::executor::{AfterPolicy, TestExecutor};
use testrunner::output::{OutputFormat, ResultFormatter, TextFailureRenderer};
use testrunner::registry;
use testrunner::suite::Environment;
use testrunner::suites;
use testrunner::utils::logger::{init_logger, LogLevel};

/// Exit code when a requested suite or test does not exist
const EXIT_NOT_FOUND: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(&args)?;

    let level = if args.verbose {
        LogLevel::Debug
    } else {
        config.log_level()
    };
    init_logger(level);
    debug!("Using configuration: {:?}", config);

    registry::init();
    suites::register_all();

    let formatter = ResultFormatter::new(config.output_format());
    let mut executor = TestExecutor::new(registry::snapshot(), Environment::from(&config))
        .with_after_policy(config.after_policy);
    if !formatter.format().is_json() {
        executor = executor.with_renderer(TextFailureRenderer);
    }

    let code = match args.command {
        cli::Command::List(list_args) => {
            let listing = api::list(executor.registry());
            println!("{}", formatter.format_listing(&listing, list_args.detailed));
            ExitCode::SUCCESS
        }
        cli::Command::Run(run_args) => run_test(&executor, &formatter, &run_args),
        cli::Command::Suite(suite_args) => match executor.run_suite(&suite_args.suite) {
            Ok(summary) => {
                println!("{}", formatter.format_suite(&summary));
                exit_code(summary.passed)
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::from(EXIT_NOT_FOUND)
            }
        },
        cli::Command::All => {
            let summaries = executor.run_all();
            println!("{}", formatter.format_suites(&summaries));
            exit_code(summaries.iter().all(|s| s.passed))
        }
    };

    registry::shutdown();
    Ok(code)
}

/// Layer configuration: file, then environment, then command-line flags
fn load_config(args: &Args) -> Result<AppConfig> {
    let env = EnvConfig::load();

    let mut config = match args.config.as_ref().or(env.config_file.as_ref()) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_default()?,
    };
    config.apply_env(&env)?;

    if let Some(format) = &args.format {
        config.format = format.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if args.after_always {
        config.after_policy = AfterPolicy::Always;
    }

    config.validate()?;
    Ok(config)
}

fn run_test(executor: &TestExecutor, formatter: &ResultFormatter, args: &cli::RunArgs) -> ExitCode {
    let response = api::run(executor, &args.suite, &args.test);

    if formatter.format().is_json() {
        let json = if formatter.format() == OutputFormat::JsonPretty {
            serde_json::to_string_pretty(&response)
        } else {
            serde_json::to_string(&response)
        };
        println!("{}", json.unwrap_or_default());
    }

    match response {
        RunResponse::Completed(result) => {
            if !formatter.format().is_json() {
                println!("{}", formatter.format_result(&result));
            }
            info!("{}.{}: {}", args.suite, result.name, result.status());
            exit_code(result.passed)
        }
        RunResponse::SuiteNotFound { suite } => {
            eprintln!("Test suite not found: {suite}");
            ExitCode::from(EXIT_NOT_FOUND)
        }
        RunResponse::TestNotFound { suite, test } => {
            eprintln!("Test {test} not found in suite {suite}");
            ExitCode::from(EXIT_NOT_FOUND)
        }
    }
}

fn exit_code(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
