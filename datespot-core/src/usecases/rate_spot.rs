use super::prelude::*;

/// How often a rating is recomputed if the spot has been rated
/// concurrently.
pub const MAX_RATING_ATTEMPTS: usize = 3;

/// Adds a rating submission to the running average of a spot.
///
/// Submissions are not attributed to users, so the same user
/// may rate a spot multiple times.
pub async fn rate_spot<R>(repo: &R, spot_id: &str, value: i64) -> Result<RatingSummary>
where
    R: SpotRepo + ?Sized,
{
    let value = RatingValue::try_from(value)?;
    for attempt in 1..=MAX_RATING_ATTEMPTS {
        let current = repo.get_spot(spot_id).await?.rating_summary();
        let next = current.add(value);
        match repo
            .update_rating(spot_id, current.total_votes, next)
            .await
        {
            Ok(()) => {
                log::debug!(
                    "Rated spot {} with {}: {:.2} ({} votes)",
                    spot_id,
                    u8::from(value),
                    f64::from(next.rating),
                    next.total_votes
                );
                return Ok(next);
            }
            Err(RepoError::InvalidVersion) => {
                log::debug!(
                    "Rating of spot {} changed concurrently (attempt {}/{})",
                    spot_id,
                    attempt,
                    MAX_RATING_ATTEMPTS
                );
            }
            Err(err) => {
                log::error!("Failed to rate spot {}: {}", spot_id, err);
                return Err(err.into());
            }
        }
    }
    log::warn!(
        "Giving up rating spot {} after {} attempts",
        spot_id,
        MAX_RATING_ATTEMPTS
    );
    Err(Error::Conflict)
}
