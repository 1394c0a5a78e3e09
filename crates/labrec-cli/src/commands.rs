//! Subcommand entry points: parse-level args in, rendered output.

use anyhow::Result;

use labrec_cli::pipeline::{
    RecordInput, StorePaths, add_record, add_test, build_criteria, classify, filter_records,
    load_tests, summarize_records, update_record,
};

use crate::cli::{AddTestArgs, ClassifyArgs, FilterArgs, ListArgs, RecordArgs};
use crate::output;

pub fn run_add_test(paths: &StorePaths, args: &AddTestArgs) -> Result<()> {
    let definition = add_test(
        paths,
        &args.name,
        &args.range,
        &args.unit,
        &args.turnaround,
        args.force,
    )?;
    println!("Added test {}.", definition.name);
    Ok(())
}

pub fn run_tests(paths: &StorePaths, args: &ListArgs) -> Result<()> {
    let catalog = load_tests(paths)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&output::tests_json(&catalog))?);
    } else {
        output::print_tests(&catalog);
    }
    Ok(())
}

pub fn run_add_record(paths: &StorePaths, args: &RecordArgs) -> Result<()> {
    let record = add_record(paths, &record_input(args))?;
    println!(
        "Added record for patient {} ({}).",
        record.patient_id, record.test_name
    );
    Ok(())
}

pub fn run_update_record(paths: &StorePaths, args: &RecordArgs) -> Result<()> {
    let record = update_record(paths, &record_input(args))?;
    println!(
        "Updated record for patient {} ({}).",
        record.patient_id, record.test_name
    );
    Ok(())
}

pub fn run_classify(paths: &StorePaths, args: &ClassifyArgs) -> Result<()> {
    let outcome = classify(paths, &args.test_name, args.value)?;
    println!("{}: {} -> {}", args.test_name, args.value, outcome);
    Ok(())
}

pub fn run_records(paths: &StorePaths, args: &FilterArgs) -> Result<()> {
    let criteria = criteria_from(args)?;
    let records = filter_records(paths, &criteria)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&output::records_json(&records))?);
    } else {
        output::print_records(&records);
    }
    Ok(())
}

pub fn run_summary(paths: &StorePaths, args: &FilterArgs) -> Result<()> {
    let criteria = criteria_from(args)?;
    let summary = summarize_records(paths, &criteria)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&output::summary_json(&summary))?);
    } else {
        output::print_summary(&summary);
    }
    Ok(())
}

fn criteria_from(args: &FilterArgs) -> Result<labrec_model::FilterCriteria> {
    build_criteria(
        args.patient.as_deref(),
        args.test.as_deref(),
        args.status.as_deref(),
        args.from.as_deref(),
        args.to.as_deref(),
        args.abnormal_only,
    )
}

fn record_input(args: &RecordArgs) -> RecordInput {
    RecordInput {
        patient_id: args.patient_id.clone(),
        test_name: args.test_name.clone(),
        test_date: args.test_date.clone(),
        result: args.result,
        unit: args.unit.clone(),
        status: args.status.clone(),
        result_date: args.result_date.clone(),
    }
}
