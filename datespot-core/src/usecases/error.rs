use crate::{
    entities::{PriceLevelOutOfRange, RatingValueOutOfRange},
    repositories,
    util::validate::GateError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Please sign in first")]
    AuthRequired,
    #[error("Please fill in all required fields ({0} is missing)")]
    MissingField(&'static str),
    #[error("A date spot with this name and location already exists")]
    DuplicateSpot,
    #[error("The sentiment of the description could not be determined")]
    SentimentUnavailable,
    #[error("The description of this date spot seems unenthusiastic. Please write a more positive review!")]
    UnenthusiasticContent,
    #[error("Rating value out of range")]
    RatingValue,
    #[error("Price level out of range")]
    PriceLevel,
    #[error("The spot has been modified concurrently, please try again")]
    Conflict,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl Error {
    /// Whether repeating the same action could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Conflict => true,
            Self::Repo(err) => !matches!(
                err,
                repositories::Error::NotFound | repositories::Error::AlreadyExists
            ),
            _ => false,
        }
    }
}

impl From<GateError> for Error {
    fn from(err: GateError) -> Self {
        match err {
            GateError::MissingField(field) => Self::MissingField(field),
            GateError::DuplicateSpot => Self::DuplicateSpot,
            GateError::SentimentUnavailable => Self::SentimentUnavailable,
            GateError::UnenthusiasticContent => Self::UnenthusiasticContent,
        }
    }
}

impl From<RatingValueOutOfRange> for Error {
    fn from(_: RatingValueOutOfRange) -> Self {
        Self::RatingValue
    }
}

impl From<PriceLevelOutOfRange> for Error {
    fn from(_: PriceLevelOutOfRange) -> Self {
        Self::PriceLevel
    }
}
