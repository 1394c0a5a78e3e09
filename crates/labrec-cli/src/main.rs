//! labrec CLI.

use clap::{ColorChoice, Parser};
use labrec_cli::logging::{LogConfig, LogFormat, init_logging};
use labrec_cli::pipeline::StorePaths;
use std::io::{self, IsTerminal};

mod cli;
mod commands;
mod output;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{
    run_add_record, run_add_test, run_classify, run_records, run_summary, run_tests,
    run_update_record,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let paths = StorePaths {
        test_file: cli.test_file.clone(),
        record_file: cli.record_file.clone(),
    };
    let result = match &cli.command {
        Command::AddTest(args) => run_add_test(&paths, args),
        Command::Tests(args) => run_tests(&paths, args),
        Command::AddRecord(args) => run_add_record(&paths, args),
        Command::UpdateRecord(args) => run_update_record(&paths, args),
        Command::Classify(args) => run_classify(&paths, args),
        Command::Records(args) => run_records(&paths, args),
        Command::Summary(args) => run_summary(&paths, args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !cli.verbosity.is_present();
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
