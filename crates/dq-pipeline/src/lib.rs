//! Pipeline manager: sequences detection, scoring, routing, cleaning,
//! and loading, with typed collaborator interfaces for the
//! destination store and the optional advisory oracle.

pub mod loader;
pub mod oracle;
mod pipeline;

pub use loader::{LoadError, LoadOutcome, TableLoader};
pub use oracle::{consult, AdvisoryOracle, OracleContext, OracleError};
pub use pipeline::Pipeline;
