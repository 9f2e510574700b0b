//! Error types for the risk engine

use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Clone)]
pub enum RiskError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(Cow<'static, str>),

    #[error("Table query out of range: {successes} successes in {trials} trials (table built for {max_trials} trials)")]
    Range {
        successes: usize,
        trials: usize,
        max_trials: usize,
    },
}

impl RiskError {
    pub(crate) fn invalid(msg: impl Into<Cow<'static, str>>) -> Self {
        RiskError::InvalidParameter(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, RiskError>;
