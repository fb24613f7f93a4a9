use async_trait::async_trait;
use datespot_core::{entities::MapPoint, gateways::geocode::ReverseGeocodingGateway};
use geocoding::{Opencage, Point, Reverse};

#[derive(Debug, Clone)]
pub struct OpenCage {
    api_key: String,
}

impl OpenCage {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

fn to_point(pos: MapPoint) -> Point<f64> {
    Point::new(pos.lng_deg(), pos.lat_deg())
}

#[async_trait]
impl ReverseGeocodingGateway for OpenCage {
    async fn resolve_place_name(&self, pos: MapPoint) -> Option<String> {
        if !pos.is_valid() {
            return None;
        }
        let api_key = self.api_key.clone();
        // The client blocks until the response arrives
        let res = tokio::task::spawn_blocking(move || {
            let oc_req = Opencage::new(api_key);
            oc_req.reverse(&to_point(pos))
        })
        .await;
        match res {
            Ok(Ok(Some(name))) if !name.trim().is_empty() => {
                log::debug!(
                    "Resolved place name of {}/{}: '{}'",
                    pos.lat_deg(),
                    pos.lng_deg(),
                    name
                );
                Some(name)
            }
            Ok(Ok(_)) => {
                log::debug!(
                    "No place name found for {}/{}",
                    pos.lat_deg(),
                    pos.lng_deg()
                );
                None
            }
            Ok(Err(err)) => {
                log::warn!(
                    "Failed to resolve place name of {}/{}: {}",
                    pos.lat_deg(),
                    pos.lng_deg(),
                    err
                );
                None
            }
            Err(err) => {
                log::error!("Reverse geocoding task failed: {err}");
                None
            }
        }
    }
}

/// Used if no reverse geocoding service has been configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReverseGeocoding;

#[async_trait]
impl ReverseGeocodingGateway for NoReverseGeocoding {
    async fn resolve_place_name(&self, _: MapPoint) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_is_lng_lat() {
        let p = to_point(MapPoint::from_lat_lng_deg(57.7089, 11.9746));
        assert_eq!(p.x(), 11.9746);
        assert_eq!(p.y(), 57.7089);
    }

    #[tokio::test]
    async fn skip_invalid_positions() {
        let gw = OpenCage::new("invalid-key");
        let pos = MapPoint::from_lat_lng_deg(100.0, 0.0);
        assert_eq!(gw.resolve_place_name(pos).await, None);
    }

    #[tokio::test]
    async fn without_service() {
        let pos = MapPoint::from_lat_lng_deg(57.7089, 11.9746);
        assert_eq!(NoReverseGeocoding.resolve_place_name(pos).await, None);
    }
}
