use anyhow::{Context, Result};
use serde_json::json;
use tracing::{info, info_span};

use savcheck_core::data_utils::cell;
use savcheck_core::{
    CheckOutcome, ColumnResolver, ScriptedResolver, display_value, parse_column_list, run_check,
};
use savcheck_model::{CheckOptions, PipelineConfig};
use savcheck_sav::read_sav;

use crate::cli::{CheckArgs, InspectArgs};
use crate::prompt::StdinResolver;
use crate::summary::{print_dictionary, print_report};
use savcheck_cli::export::write_report_csv;

pub fn run_check_command(args: &CheckArgs) -> Result<CheckOutcome> {
    let span = info_span!("check", file = %args.file.display());
    let _guard = span.enter();

    let config = build_config(args);
    let mut resolver: Box<dyn ColumnResolver> = if args.proceed_on_missing {
        Box::new(ScriptedResolver::proceed())
    } else {
        Box::new(StdinResolver)
    };
    let outcome = run_check(&args.file, &config, resolver.as_mut())?;

    if args.json {
        println!("{}", render_json(&outcome)?);
    } else {
        print_report(&outcome);
    }
    if let Some(path) = &args.output {
        write_report_csv(&outcome.report, path)?;
        info!(path = %path.display(), rows = outcome.report.height(), "report written");
        if !args.json {
            println!("Report written to {}", path.display());
        }
    }
    Ok(outcome)
}

pub fn run_inspect_command(args: &InspectArgs) -> Result<()> {
    let dataset = read_sav(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    print_dictionary(&dataset);
    Ok(())
}

fn build_config(args: &CheckArgs) -> PipelineConfig {
    let check = CheckOptions::new()
        .with_status_column(&args.status_column)
        .with_cancelled_status(&args.cancelled_status)
        .with_id_column(&args.id_column)
        .with_subject_column(&args.subject_column);
    PipelineConfig::new()
        .with_upper_columns(parse_column_list(&args.upper_columns))
        .with_int_columns(parse_column_list(&args.int_columns))
        .with_label_columns(parse_column_list(&args.label_columns))
        .with_required_subset(parse_column_list(&args.required_subset))
        .with_check(check)
}

fn render_json(outcome: &CheckOutcome) -> Result<String> {
    let names = outcome.report.get_column_names_owned();
    let mut records = Vec::with_capacity(outcome.report.height());
    for idx in 0..outcome.report.height() {
        let mut record = serde_json::Map::new();
        for name in &names {
            let value = cell(&outcome.report, name.as_str(), idx);
            record.insert(name.to_string(), json!(display_value(value)));
        }
        records.push(serde_json::Value::Object(record));
    }
    let payload = json!({
        "meta": outcome.meta,
        "duplicates": records,
        "diagnostics": outcome.diagnostics,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}
