use crate::entities::*;
use thiserror::Error;

pub trait AutoCorrect {
    fn auto_correct(self) -> Self;
}

/// Reasons for rejecting a submitted spot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Please fill in all required fields ({0} is missing)")]
    MissingField(&'static str),
    #[error("A date spot with this name and location already exists")]
    DuplicateSpot,
    #[error("The sentiment of the description could not be determined")]
    SentimentUnavailable,
    #[error("The description of this date spot seems unenthusiastic. Please write a more positive review!")]
    UnenthusiasticContent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateConfig {
    /// Descriptions scoring at or below this value are rejected.
    pub sentiment_threshold: f64,
    pub require_coordinates: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            sentiment_threshold: 0.0,
            require_coordinates: false,
        }
    }
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn require_text(field: &'static str, value: &str) -> Result<(), GateError> {
    if is_blank(value) {
        return Err(GateError::MissingField(field));
    }
    Ok(())
}

/// Two spots are duplicates if both name and location are equal
/// ignoring case.
pub fn is_duplicate<'a>(
    name: &str,
    location: &str,
    existing: impl IntoIterator<Item = &'a Spot>,
) -> bool {
    let name = name.to_lowercase();
    let location = location.to_lowercase();
    existing
        .into_iter()
        .any(|s| s.name.to_lowercase() == name && s.location.to_lowercase() == location)
}

pub fn check_sentiment_score(score: f64, threshold: f64) -> Result<(), GateError> {
    if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
        return Err(GateError::SentimentUnavailable);
    }
    if score <= threshold {
        return Err(GateError::UnenthusiasticContent);
    }
    Ok(())
}
