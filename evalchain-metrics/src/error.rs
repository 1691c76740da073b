use thiserror::Error;
use evalchain_core::EvalchainError;

#[derive(Debug, Error)]
pub enum MetricError {
    #[error("metric requires {0}")]
    MissingReference(&'static str),
    #[error("trajectory must contain at least one turn")]
    EmptyTrajectory,
    #[error("judge call failed: {0}")]
    Judge(#[from] EvalchainError),
    #[error("judge returned an unusable verdict '{output}': {reason}")]
    Verdict { output: String, reason: String },
}
