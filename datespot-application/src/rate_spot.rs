use super::*;
use crate::remote::remote_call;
use std::time::Duration;

pub async fn rate_spot<D>(
    db: &D,
    spot_id: &str,
    value: i64,
    timeout: Duration,
) -> Result<RatingSummary>
where
    D: SpotRepo + ?Sized,
{
    remote_call(timeout, "rate spot", usecases::rate_spot(db, spot_id, value))
        .await
        .inspect_err(|err| warn!("Failed to rate spot {}: {}", spot_id, err))
}
