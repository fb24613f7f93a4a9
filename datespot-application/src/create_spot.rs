use super::*;
use crate::remote::{remote_call, FlowConfig};
use datespot_core::util::validate::AutoCorrect;
use std::sync::Arc;
use tokio::sync::watch;
use usecases::NewSpot;

/// The remote services needed to accept a new spot.
#[derive(Clone)]
pub struct SpotServices {
    pub sentiment: Arc<dyn SentimentGateway>,
    pub geocoding: Arc<dyn ReverseGeocodingGateway>,
    /// Without it spots can only reference external image URLs.
    pub upload: Option<Arc<dyn AssetUploadGateway>>,
}

/// Validates, enriches and stores a spot submitted by the signed-in user.
///
/// The optional image is uploaded after the submission passed all
/// checks. The upload progress is published through `progress` and
/// reset to `None` when the upload has finished or failed.
pub async fn create_spot<D>(
    db: &D,
    services: &SpotServices,
    config: &FlowConfig,
    user: Option<&User>,
    new_spot: NewSpot,
    image: Option<Asset>,
    progress: &watch::Sender<Option<f64>>,
) -> Result<Spot>
where
    D: SpotRepo + ?Sized,
{
    let Some(user) = user else {
        return Err(usecases::Error::AuthRequired.into());
    };
    let mut new_spot = new_spot.auto_correct();
    if new_spot.location.is_empty() {
        if let Some(pos) = new_spot.coordinates {
            new_spot.location = resolve_location(services, config, pos)
                .await
                .unwrap_or_default();
        }
    }
    let existing = remote_call(config.timeout, "load spots", db.all_spots()).await?;
    remote_call(
        config.timeout,
        "validate spot",
        usecases::validate_new_spot(
            &new_spot,
            &existing,
            services.sentiment.as_ref(),
            &config.gate,
        ),
    )
    .await
    .inspect_err(|err| info!("Rejected spot '{}': {}", new_spot.name, err))?;
    let uploaded_image_url = match image {
        Some(asset) => {
            let res = upload_image(services, config, asset, progress).await;
            progress.send_replace(None);
            Some(res?)
        }
        None => None,
    };
    let spot = usecases::prepare_new_spot(new_spot, user, uploaded_image_url);
    remote_call(
        config.timeout,
        "store spot",
        usecases::store_new_spot(db, spot),
    )
    .await
}

async fn resolve_location(
    services: &SpotServices,
    config: &FlowConfig,
    pos: MapPoint,
) -> Option<String> {
    let lookup = services.geocoding.resolve_place_name(pos);
    match tokio::time::timeout(config.timeout, lookup).await {
        Ok(name) => {
            debug!(
                "Resolved {}/{} to {:?}",
                pos.lat_deg(),
                pos.lng_deg(),
                name
            );
            name
        }
        Err(_) => {
            warn!("Reverse geocoding timed out after {:?}", config.timeout);
            None
        }
    }
}

async fn upload_image(
    services: &SpotServices,
    config: &FlowConfig,
    asset: Asset,
    progress: &watch::Sender<Option<f64>>,
) -> Result<String> {
    let Some(upload) = &services.upload else {
        return Err(UploadError::Other(anyhow::anyhow!("No upload service configured")).into());
    };
    progress.send_replace(Some(0.0));
    let file_name = asset.file_name.clone();
    remote_call(
        config.timeout,
        "upload image",
        upload.upload(asset, progress),
    )
    .await
    .inspect(|url| info!("Uploaded '{}' to {}", file_name, url))
    .inspect_err(|err| warn!("Failed to upload '{}': {}", file_name, err))
}
