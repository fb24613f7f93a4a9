use async_trait::async_trait;
use datespot_entities::geo::MapPoint;

#[async_trait]
pub trait ReverseGeocodingGateway: Send + Sync {
    /// Human-readable name of the place at the given position, if any.
    async fn resolve_place_name(&self, pos: MapPoint) -> Option<String>;
}
