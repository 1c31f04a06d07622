use thiserror::Error;

/// Result type alias for planning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing a cutting plan.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Strategy name not recognized by the driver.
    #[error("unsupported method '{0}'")]
    UnsupportedMethod(String),

    /// No legal completion exists along any explored branch.
    #[error("no solvable cutting plan exists")]
    Unsolvable,

    /// Candidate generation requested on an already complete layout.
    /// Unreachable under correct search control flow.
    #[error("layout is already done")]
    LayoutDone,

    /// Input contract violation.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Configured search step budget exhausted.
    #[error("step limit of {0} exceeded")]
    StepLimit(usize),
}
