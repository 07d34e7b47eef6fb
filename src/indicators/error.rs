use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("moving average window must be at least 1, got {0}")]
    InvalidWindow(usize),
}
