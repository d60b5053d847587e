//! Command implementations for `check` and `run`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use dq_cli::loader::{CsvFileLoader, DiscardLoader};
use dq_ingest::{list_table_files, read_table_path};
use dq_model::{PipelineResult, QualityConfig, RoutingDecision, RunStatus, RunSummary};
use dq_pipeline::Pipeline;
use dq_quality::{detect, route, score};

use crate::cli::{CheckArgs, QualityArgs, RunArgs};
use crate::summary::{print_report, print_run_summaries};

pub fn run_check(args: &CheckArgs) -> Result<i32> {
    let config = quality_config(&args.quality);
    let dataset = read_table_path(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;

    let issues = detect(&dataset, &config);
    let report = score(&dataset, &issues, &config);
    let decision = route(report.score, &config);
    info!(score = report.score, %decision, "check complete");

    let source = args.file.display().to_string();
    if args.json {
        let payload = serde_json::json!({
            "source": source,
            "score": report.score,
            "decision": decision,
            "row_count": report.row_count,
            "column_count": report.column_count,
            "issues": report.issues,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_report(&source, &report, decision);
    }

    Ok(if decision == RoutingDecision::Abort { 1 } else { 0 })
}

pub fn run_run(args: &RunArgs) -> Result<i32> {
    let config = quality_config(&args.quality);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("output"));
    let files = expand_inputs(&args.inputs)?;

    let mut runs: Vec<(String, PipelineResult)> = Vec::new();
    for file in files {
        let source = file.display().to_string();
        let span = info_span!("run_file", source = %source);
        let _guard = span.enter();

        let result = match read_table_path(&file) {
            Ok(dataset) => {
                if args.dry_run {
                    Pipeline::new(config.clone(), DiscardLoader).run(&source, &dataset, None)
                } else {
                    let destination = output_dir.join(destination_name(&file));
                    let loader = CsvFileLoader::new(destination);
                    Pipeline::new(config.clone(), loader).run(&source, &dataset, None)
                }
            }
            Err(error) => {
                let reason = format!("ingest failed: {error}");
                PipelineResult {
                    status: RunStatus::Failed,
                    rows_in: 0,
                    rows_out: 0,
                    decision: None,
                    report: None,
                    errors: vec![reason.clone()],
                    reason,
                }
            }
        };
        runs.push((source, result));
    }

    if args.json {
        let summaries: Vec<RunSummary> = runs
            .iter()
            .map(|(source, result)| result.summary(source.clone()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print_run_summaries(&runs);
    }

    let failed = runs
        .iter()
        .any(|(_, result)| result.status == RunStatus::Failed);
    Ok(if failed { 1 } else { 0 })
}

fn quality_config(args: &QualityArgs) -> QualityConfig {
    let mut config = QualityConfig::new();
    if let Some(column) = &args.id_column {
        config = config.with_id_column(column.clone());
    }
    if let Some(columns) = &args.key_columns {
        config = config.with_key_columns(columns.clone());
    }
    if let Some(multiple) = args.outlier_multiple {
        config = config.with_outlier_multiple(multiple);
    }
    config
}

/// Expand the input paths: directories contribute their table files,
/// everything else is taken as-is.
fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let tables = list_table_files(input)
                .with_context(|| format!("list tables in {}", input.display()))?;
            files.extend(tables);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn destination_name(file: &Path) -> String {
    let stem = file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("table");
    format!("{stem}.csv")
}
