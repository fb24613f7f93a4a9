pub mod geocode;
pub mod sentiment;
pub mod upload;
