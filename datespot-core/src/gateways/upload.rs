use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("The asset is empty")]
    EmptyAsset,
    #[error("The upload has been rejected: {0}")]
    Rejected(String),
    #[error("No asset URL has been returned")]
    MissingUrl,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone)]
pub struct Asset {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Receives the upload progress as a fraction within `[0, 1]`.
pub trait UploadProgress: Send + Sync {
    fn report(&self, fraction: f64);
}

impl UploadProgress for watch::Sender<Option<f64>> {
    fn report(&self, fraction: f64) {
        self.send_replace(Some(fraction.clamp(0.0, 1.0)));
    }
}

#[async_trait]
pub trait AssetUploadGateway: Send + Sync {
    /// Uploads the asset and returns the URL it can be retrieved from.
    async fn upload(
        &self,
        asset: Asset,
        progress: &dyn UploadProgress,
    ) -> Result<String, UploadError>;
}
