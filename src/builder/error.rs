//! Build errors for the judge builder.

use crate::audit::AuditError;
use crate::core::State;
use thiserror::Error;

/// Errors that can occur when building a judge.
#[derive(Debug, Error)]
pub enum BuildError<S: State> {
    #[error("Field not specified. Call .field(field) before .build()")]
    MissingField,

    #[error("Rule tables incomplete: {} missing rule(s)", .0.len())]
    Incomplete(Vec<AuditError<S>>),
}
