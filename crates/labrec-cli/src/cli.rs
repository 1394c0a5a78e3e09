//! CLI argument definitions for the labrec tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "labrec",
    version,
    about = "Manage a catalog of medical tests and a log of patient test records",
    long_about = "Manage a catalog of medical test definitions (reference range, unit,\n\
                  turnaround policy) and a flat-file log of patient test records.\n\
                  Supports filtered listings, abnormal-result detection, and aggregate\n\
                  summary statistics over the filtered set."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path of the test catalog file.
    #[arg(
        long = "test-file",
        value_name = "PATH",
        default_value = "medicalTest.txt",
        global = true
    )]
    pub test_file: PathBuf,

    /// Path of the patient record file.
    #[arg(
        long = "record-file",
        value_name = "PATH",
        default_value = "medicalRecord.txt",
        global = true
    )]
    pub record_file: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a test definition to the catalog.
    AddTest(AddTestArgs),

    /// List the test catalog.
    Tests(ListArgs),

    /// Add a patient test record.
    AddRecord(RecordArgs),

    /// Update the first stored record for a patient and test.
    UpdateRecord(RecordArgs),

    /// Classify a result value against a test's reference range.
    Classify(ClassifyArgs),

    /// List patient records matching the filters.
    Records(FilterArgs),

    /// Aggregate statistics over the records matching the filters.
    Summary(FilterArgs),
}

#[derive(Parser)]
pub struct AddTestArgs {
    /// Test name (catalog key).
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Reference range, e.g. '>13.8,<17.2', '>10', or empty for unbounded.
    #[arg(long = "range", value_name = "RANGE", default_value = "")]
    pub range: String,

    /// Result unit, e.g. 'g/dL'.
    #[arg(long = "unit", value_name = "UNIT")]
    pub unit: String,

    /// Turnaround policy as days-hours-minutes, e.g. '1-0-0'.
    #[arg(long = "turnaround", value_name = "D-H-M")]
    pub turnaround: String,

    /// Replace an existing definition with the same name.
    #[arg(long = "force")]
    pub force: bool,
}

#[derive(Parser)]
pub struct RecordArgs {
    /// Patient id (7 digits).
    #[arg(value_name = "PATIENT_ID")]
    pub patient_id: String,

    /// Test name; must exist in the catalog.
    #[arg(value_name = "TEST")]
    pub test_name: String,

    /// Test timestamp, YYYY-MM-DD HH:MM:SS.
    #[arg(long = "date", value_name = "TIMESTAMP")]
    pub test_date: String,

    /// Numeric result value.
    #[arg(long = "result", value_name = "VALUE")]
    pub result: f64,

    /// Result unit; must be used by some catalog test.
    #[arg(long = "unit", value_name = "UNIT")]
    pub unit: String,

    /// Record status: pending, completed, or reviewed.
    #[arg(long = "status", value_name = "STATUS")]
    pub status: String,

    /// Result timestamp; must be after the test timestamp.
    #[arg(long = "result-date", value_name = "TIMESTAMP")]
    pub result_date: Option<String>,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Test name to look up in the catalog.
    #[arg(value_name = "TEST")]
    pub test_name: String,

    /// Result value to classify.
    #[arg(value_name = "VALUE")]
    pub value: f64,
}

#[derive(Parser)]
pub struct FilterArgs {
    /// Keep only records for this patient id.
    #[arg(long = "patient", value_name = "PATIENT_ID")]
    pub patient: Option<String>,

    /// Keep only records for this test name.
    #[arg(long = "test", value_name = "NAME")]
    pub test: Option<String>,

    /// Keep only records with this status (case-insensitive).
    #[arg(long = "status", value_name = "STATUS")]
    pub status: Option<String>,

    /// Keep only records tested at or after this date or timestamp.
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<String>,

    /// Keep only records tested at or before this date or timestamp.
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<String>,

    /// Keep only results outside their test's reference range.
    #[arg(long = "abnormal-only")]
    pub abnormal_only: bool,

    /// Emit JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Emit JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
