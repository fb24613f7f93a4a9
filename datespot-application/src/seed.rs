use super::*;
use crate::remote::remote_call;
use std::time::Duration;

/// Fills an empty store with the sample spots.
pub async fn seed_sample_data<D>(db: &D, timeout: Duration) -> Result<usize>
where
    D: SpotRepo + ?Sized,
{
    remote_call(
        timeout,
        "seed sample spots",
        usecases::seed_sample_spots(db),
    )
    .await
}
