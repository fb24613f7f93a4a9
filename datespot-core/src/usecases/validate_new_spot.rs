use super::prelude::*;
use crate::{
    gateways::sentiment::SentimentGateway,
    util::validate::{self, AutoCorrect, GateConfig, GateError},
};

/// A spot as submitted by a user.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct NewSpot {
    pub name           : String,
    pub location       : String,
    pub description    : String,
    pub category       : Category,
    pub price_level    : PriceLevel,
    pub tags           : Vec<String>,
    pub image_url      : Option<String>,
    pub coordinates    : Option<MapPoint>,
    pub pet_friendly   : bool,
    /// Counts as the first rating of the spot.
    pub initial_rating : Option<RatingValue>,
}

impl NewSpot {
    pub fn check_required_fields(
        &self,
        require_coordinates: bool,
    ) -> std::result::Result<(), GateError> {
        validate::require_text("name", &self.name)?;
        validate::require_text("location", &self.location)?;
        validate::require_text("description", &self.description)?;
        if require_coordinates && !self.coordinates.map(MapPoint::is_valid).unwrap_or(false) {
            return Err(GateError::MissingField("coordinates"));
        }
        Ok(())
    }
}

impl AutoCorrect for NewSpot {
    fn auto_correct(mut self) -> Self {
        self.name = self.name.trim().to_owned();
        self.location = self.location.trim().to_owned();
        self.description = self.description.trim().to_owned();
        self.tags = super::prepare_tag_list(self.tags.iter().map(String::as_str));
        self.image_url = self
            .image_url
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());
        if let Some(pos) = self.coordinates.filter(|pos| !pos.is_valid()) {
            log::warn!(
                "Ignoring invalid coordinates {}/{}",
                pos.lat_deg(),
                pos.lng_deg()
            );
            self.coordinates = None;
        }
        self
    }
}

/// Runs all checks a new spot must pass before it is stored,
/// short-circuiting on the first failure.
///
/// The sentiment service is only asked if all local checks passed.
pub async fn validate_new_spot<G>(
    candidate: &NewSpot,
    existing: &[Spot],
    sentiment: &G,
    config: &GateConfig,
) -> std::result::Result<(), GateError>
where
    G: SentimentGateway + ?Sized,
{
    candidate.check_required_fields(config.require_coordinates)?;
    if validate::is_duplicate(&candidate.name, &candidate.location, existing) {
        log::info!(
            "Rejecting duplicate spot '{}' at '{}'",
            candidate.name,
            candidate.location
        );
        return Err(GateError::DuplicateSpot);
    }
    let score = match sentiment.sentiment_score(&candidate.description).await {
        Ok(score) => score,
        Err(err) => {
            log::warn!("Sentiment analysis failed: {}", err);
            return Err(GateError::SentimentUnavailable);
        }
    };
    log::debug!("Sentiment score of '{}': {}", candidate.name, score);
    validate::check_sentiment_score(score, config.sentiment_threshold)
}
