use datespot_core::{
    gateways::upload::UploadError, repositories::Error as RepoError, usecases,
    util::validate::GateError,
};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] usecases::Error),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("No response within {0:?}, please try again")]
    Timeout(Duration),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the user should be offered to repeat the action.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Business(err) => err.is_retryable(),
            Self::Timeout(_) => true,
            Self::Upload(UploadError::Other(_)) => true,
            Self::Upload(_) | Self::Other(_) => false,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(err.into())
    }
}

impl From<GateError> for AppError {
    fn from(err: GateError) -> AppError {
        AppError::Business(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(AppError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(AppError::from(usecases::Error::Conflict).is_retryable());
        assert!(AppError::from(RepoError::Other(anyhow::anyhow!("offline"))).is_retryable());
        assert!(!AppError::from(RepoError::NotFound).is_retryable());
        assert!(!AppError::from(GateError::DuplicateSpot).is_retryable());
        assert!(!AppError::from(usecases::Error::AuthRequired).is_retryable());
        assert!(!AppError::from(UploadError::EmptyAsset).is_retryable());
    }

    #[test]
    fn gate_errors_are_business_errors() {
        let err = AppError::from(GateError::MissingField("name"));
        assert!(matches!(
            err,
            AppError::Business(usecases::Error::MissingField("name"))
        ));
    }
}
