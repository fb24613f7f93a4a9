use async_trait::async_trait;
use datespot_core::{
    entities::Timestamp,
    gateways::upload::{Asset, AssetUploadGateway, UploadError, UploadProgress},
};
use futures::stream;
use reqwest::{header::CONTENT_TYPE, Body};
use serde::Deserialize;
use tokio::sync::watch;

const CHUNK_SIZE: usize = 64 * 1024;

/// All uploaded assets are stored below this folder.
pub const ASSET_FOLDER: &str = "date-spots";

/// Uploads assets with a `PUT` request per asset.
///
/// The server must answer with a JSON object containing the public
/// `url` (or `downloadUrl`) of the stored asset.
#[derive(Debug, Clone)]
pub struct HttpUpload {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpUpload {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_owned(),
            http: reqwest::Client::new(),
        }
    }

    fn asset_url(&self, file_name: &str, at: Timestamp) -> String {
        format!(
            "{}/{ASSET_FOLDER}/{}-{}",
            self.endpoint,
            at.into_millis(),
            sanitize_file_name(file_name)
        )
    }
}

fn sanitize_file_name(file_name: &str) -> String {
    let name: String = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() {
        return "asset".to_owned();
    }
    name
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    url: Option<String>,
    download_url: Option<String>,
}

impl UploadResponse {
    fn into_url(self) -> Option<String> {
        self.url
            .or(self.download_url)
            .filter(|url| !url.trim().is_empty())
    }
}

#[async_trait]
impl AssetUploadGateway for HttpUpload {
    async fn upload(
        &self,
        asset: Asset,
        progress: &dyn UploadProgress,
    ) -> Result<String, UploadError> {
        let Asset {
            file_name,
            content_type,
            bytes,
        } = asset;
        if bytes.is_empty() {
            return Err(UploadError::EmptyAsset);
        }
        let total = bytes.len();
        let url = self.asset_url(&file_name, Timestamp::now());
        log::debug!("Uploading {total} bytes to {url}");

        // The body stream must be 'static and reports the number of
        // bytes that have been handed over to the connection.
        let (sent_tx, mut sent_rx) = watch::channel(0_usize);
        let chunks: Vec<Vec<u8>> = bytes.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();
        let body = stream::iter(chunks.into_iter().map(move |chunk| {
            sent_tx.send_modify(|sent| *sent += chunk.len());
            Ok::<_, std::io::Error>(chunk)
        }));
        let request = self
            .http
            .put(&url)
            .header(
                CONTENT_TYPE,
                content_type.as_deref().unwrap_or("application/octet-stream"),
            )
            .body(Body::wrap_stream(body))
            .send();
        tokio::pin!(request);

        progress.report(0.0);
        let response = loop {
            tokio::select! {
                res = &mut request => break res,
                Ok(()) = sent_rx.changed() => {
                    let sent = *sent_rx.borrow_and_update();
                    progress.report(sent as f64 / total as f64);
                }
            }
        }
        .map_err(|err| UploadError::Other(err.into()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("Upload to {url} rejected ({status}): {error_text}");
            return Err(UploadError::Rejected(format!("{status}: {error_text}")));
        }
        let url = response
            .json::<UploadResponse>()
            .await
            .map_err(|err| UploadError::Other(err.into()))?
            .into_url()
            .ok_or(UploadError::MissingUrl)?;
        progress.report(1.0);
        log::info!("Uploaded asset '{file_name}' to {url}");
        Ok(url)
    }
}
