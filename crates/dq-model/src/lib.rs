pub mod config;
pub mod dataset;
pub mod dates;
pub mod error;
pub mod issue;
pub mod plan;
pub mod report;
pub mod result;
pub mod value;

pub use config::{BasePenalties, QualityConfig, SeverityWeights};
pub use dataset::{ColumnMeta, ColumnType, Dataset, Schema, SchemaChange};
pub use error::{DqError, Result};
pub use issue::{Issue, IssueKind, Severity};
pub use plan::{CleaningPlan, RepairOp, RepairStep};
pub use report::{QualityReport, RoutingDecision};
pub use result::{PipelineResult, RunStatus, RunSummary};
pub use value::CellValue;
