//! The run state machine.
//!
//! One run walks RECEIVED -> DETECTED -> SCORED -> ROUTED and then
//! either stops (rejected), cleans and loads, or loads directly.
//! Every run terminates exactly once with a typed status and a
//! human-readable reason.

use std::time::Duration;

use tracing::{debug, info, info_span, warn};

use dq_clean::{apply, plan};
use dq_model::{
    ColumnMeta, Dataset, PipelineResult, QualityConfig, QualityReport, RoutingDecision, RunStatus,
    Schema,
};
use dq_quality::{detect, route, score};

use crate::loader::{LoadError, LoadOutcome, TableLoader};
use crate::oracle::{consult, AdvisoryOracle, OracleContext};

/// Transient load failures are retried this many times before the run
/// fails. Schema-evolution recovery does not consume this budget.
const MAX_TRANSIENT_RETRIES: usize = 2;

const DEFAULT_BACKOFF: Duration = Duration::from_millis(250);

/// Sequences detection, scoring, routing, cleaning, and loading for
/// one dataset at a time.
pub struct Pipeline<L> {
    config: QualityConfig,
    loader: L,
    oracle: Option<Box<dyn AdvisoryOracle>>,
    backoff: Duration,
}

impl<L: TableLoader> Pipeline<L> {
    pub fn new(config: QualityConfig, loader: L) -> Self {
        Self {
            config,
            loader,
            oracle: None,
            backoff: DEFAULT_BACKOFF,
        }
    }

    pub fn with_oracle(mut self, oracle: Box<dyn AdvisoryOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Base backoff between transient retries; attempt `n` waits
    /// `n x backoff`.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn into_loader(self) -> L {
        self.loader
    }

    /// Run the full pipeline for one dataset.
    ///
    /// `previous_schema` is the schema of the prior run against the
    /// same destination, if known; it sharpens schema-evolution
    /// recovery when the loader reports a conflict without naming
    /// columns.
    pub fn run(
        &mut self,
        source: &str,
        dataset: &Dataset,
        previous_schema: Option<&Schema>,
    ) -> PipelineResult {
        let span = info_span!("pipeline_run", source = %source);
        let _guard = span.enter();

        let rows_in = dataset.row_count();

        // RECEIVED: reject malformed shapes before any analysis.
        if let Some(reason) = validate_shape(dataset) {
            warn!(reason, "dataset failed validation");
            return PipelineResult {
                status: RunStatus::Failed,
                rows_in,
                rows_out: 0,
                decision: None,
                report: None,
                errors: vec![format!("validation: {reason}")],
                reason: reason.to_string(),
            };
        }

        // DETECTED -> SCORED.
        let issues = detect(dataset, &self.config);
        let report = score(dataset, &issues, &self.config);
        debug!(
            score = report.score,
            issues = report.issue_count(),
            "dataset scored"
        );

        // ROUTED.
        let decision = route(report.score, &self.config);
        info!(score = report.score, %decision, "routing decision");
        let context = OracleContext::from_report(&report, decision);
        consult(
            self.oracle.as_deref(),
            "narrate the quality assessment",
            &context,
        );

        match decision {
            RoutingDecision::Abort => PipelineResult {
                status: RunStatus::Rejected,
                rows_in,
                rows_out: 0,
                decision: Some(decision),
                reason: format!(
                    "quality score {} below {}, rejected without loading",
                    report.score, self.config.abort_below
                ),
                report: Some(report),
                errors: Vec::new(),
            },
            RoutingDecision::Clean => {
                let cleaning = plan(&report.issues);
                consult(
                    self.oracle.as_deref(),
                    "narrate the cleaning plan",
                    &context,
                );
                let (cleaned, fixes) = apply(dataset, &cleaning, &self.config);
                for fix in &fixes {
                    debug!(fix, "applied repair");
                }
                self.finish_with_load(rows_in, decision, report, &cleaned, previous_schema)
            }
            RoutingDecision::Proceed => {
                self.finish_with_load(rows_in, decision, report, dataset, previous_schema)
            }
        }
    }

    /// Process a batch sequentially against the single shared loader.
    pub fn run_batch(&mut self, inputs: &[(String, Dataset)]) -> Vec<PipelineResult> {
        inputs
            .iter()
            .map(|(source, dataset)| self.run(source, dataset, None))
            .collect()
    }

    fn finish_with_load(
        &mut self,
        rows_in: usize,
        decision: RoutingDecision,
        report: QualityReport,
        dataset: &Dataset,
        previous_schema: Option<&Schema>,
    ) -> PipelineResult {
        let mut errors = Vec::new();
        match self.load_with_retry(dataset, previous_schema, &mut errors) {
            Some(outcome) => PipelineResult {
                status: RunStatus::Success,
                rows_in,
                rows_out: outcome.rows_loaded,
                decision: Some(decision),
                reason: match decision {
                    RoutingDecision::Clean => format!(
                        "cleaned {} rows down to {} and loaded",
                        rows_in, outcome.rows_loaded
                    ),
                    _ => format!("loaded {} rows", outcome.rows_loaded),
                },
                report: Some(report),
                errors,
            },
            None => PipelineResult {
                status: RunStatus::Failed,
                rows_in,
                rows_out: 0,
                decision: Some(decision),
                report: Some(report),
                reason: errors
                    .last()
                    .cloned()
                    .unwrap_or_else(|| "load failed".to_string()),
                errors,
            },
        }
    }

    /// Load with the fixed retry policy: up to two retries on
    /// transient failures with linear backoff, one schema-evolution
    /// recovery outside that budget, and an immediate failure on
    /// permission errors.
    fn load_with_retry(
        &mut self,
        dataset: &Dataset,
        previous_schema: Option<&Schema>,
        errors: &mut Vec<String>,
    ) -> Option<LoadOutcome> {
        let mut transient_retries = 0;
        let mut evolved = false;
        loop {
            match self.loader.load(dataset) {
                Ok(outcome) => {
                    info!(rows_loaded = outcome.rows_loaded, "load complete");
                    return Some(outcome);
                }
                Err(LoadError::SchemaConflict { columns }) if !evolved => {
                    let missing = missing_columns(dataset, previous_schema, &columns);
                    info!(
                        columns = ?missing.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
                        "schema conflict, evolving destination"
                    );
                    if let Err(error) = self.loader.add_missing_columns(&missing) {
                        errors.push(format!("schema evolution failed: {error}"));
                        return None;
                    }
                    evolved = true;
                }
                Err(error @ LoadError::Transient(_)) if transient_retries < MAX_TRANSIENT_RETRIES => {
                    transient_retries += 1;
                    warn!(%error, retry = transient_retries, "transient load failure, retrying");
                    errors.push(format!("load attempt {transient_retries} failed: {error}"));
                    std::thread::sleep(self.backoff * transient_retries as u32);
                }
                Err(error) => {
                    errors.push(format!("load failed: {error}"));
                    return None;
                }
            }
        }
    }
}

fn validate_shape(dataset: &Dataset) -> Option<&'static str> {
    if dataset.column_count() == 0 {
        Some("dataset has no columns")
    } else if dataset.row_count() == 0 {
        Some("dataset has no rows")
    } else {
        None
    }
}

/// Columns to append during schema evolution: the conflict's named
/// columns resolved against the dataset schema, or the diff against
/// the prior run's schema when the loader named none.
fn missing_columns(
    dataset: &Dataset,
    previous_schema: Option<&Schema>,
    named: &[String],
) -> Vec<ColumnMeta> {
    let resolve = |names: &[String]| -> Vec<ColumnMeta> {
        names
            .iter()
            .filter_map(|name| {
                dataset
                    .column_index(name)
                    .and_then(|index| dataset.schema().get(index))
                    .cloned()
            })
            .collect()
    };

    let resolved = resolve(named);
    if !resolved.is_empty() {
        return resolved;
    }
    if let Some(previous) = previous_schema {
        let change = dataset.schema().diff(previous);
        return resolve(&change.added);
    }
    Vec::new()
}
