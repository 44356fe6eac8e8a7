use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Analysis parameter '{0}' is invalid: {1}")]
    InvalidParameter(&'static str, String),
}
