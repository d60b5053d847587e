//! Optional advisory oracle.
//!
//! The oracle narrates decisions the rule-based path has already
//! made. It never gates correctness: every call goes through
//! [`consult`], which swallows failures with a warning and moves on.

use thiserror::Error;
use tracing::{debug, warn};

use dq_model::{QualityReport, RoutingDecision};

#[derive(Debug, Clone, Error)]
pub enum OracleError {
    #[error("oracle call timed out")]
    Timeout,

    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    #[error("malformed oracle response: {0}")]
    Malformed(String),
}

/// Structured context handed to the oracle alongside the prompt.
#[derive(Debug, Clone)]
pub struct OracleContext {
    pub score: u8,
    pub decision: RoutingDecision,
    pub issue_summary: String,
}

impl OracleContext {
    pub fn from_report(report: &QualityReport, decision: RoutingDecision) -> Self {
        let issue_summary = if report.issues.is_empty() {
            "no issues".to_string()
        } else {
            report
                .issues
                .iter()
                .map(|issue| match &issue.column {
                    Some(column) => {
                        format!("{} {} in {column} ({} rows)", issue.severity, issue.kind, issue.affected())
                    }
                    None => format!("{} {} ({} rows)", issue.severity, issue.kind, issue.affected()),
                })
                .collect::<Vec<_>>()
                .join("; ")
        };
        Self {
            score: report.score,
            decision,
            issue_summary,
        }
    }
}

/// Narration service consulted with a prompt and a small structured
/// context. Implementations should bound their own timeouts.
pub trait AdvisoryOracle {
    fn advise(&self, prompt: &str, context: &OracleContext) -> Result<String, OracleError>;
}

/// Ask the oracle if one is configured. Errors are logged at `warn`
/// and swallowed; the oracle is never retried and never affects the
/// run outcome.
pub fn consult(
    oracle: Option<&dyn AdvisoryOracle>,
    prompt: &str,
    context: &OracleContext,
) -> Option<String> {
    let oracle = oracle?;
    match oracle.advise(prompt, context) {
        Ok(narration) => {
            debug!(%prompt, narration, "oracle narration");
            Some(narration)
        }
        Err(error) => {
            warn!(%prompt, %error, "advisory oracle failed, continuing without it");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_model::{Issue, IssueKind, Severity};

    struct Flaky;

    impl AdvisoryOracle for Flaky {
        fn advise(&self, _prompt: &str, _context: &OracleContext) -> Result<String, OracleError> {
            Err(OracleError::Timeout)
        }
    }

    fn context() -> OracleContext {
        let report = QualityReport {
            score: 65,
            issues: vec![Issue::for_column(
                IssueKind::Null,
                "amount",
                [1, 2, 3],
                Severity::Medium,
            )],
            row_count: 15,
            column_count: 3,
        };
        OracleContext::from_report(&report, RoutingDecision::Clean)
    }

    #[test]
    fn failures_are_swallowed() {
        assert_eq!(consult(Some(&Flaky), "narrate", &context()), None);
    }

    #[test]
    fn absent_oracle_is_skipped() {
        assert_eq!(consult(None, "narrate", &context()), None);
    }

    #[test]
    fn context_summarizes_issues() {
        let context = context();
        assert_eq!(context.score, 65);
        assert_eq!(context.issue_summary, "medium null in amount (3 rows)");
    }
}
