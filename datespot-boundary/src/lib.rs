//! Raw documents as they are kept in the `spots` and `votes` collections.
//!
//! Every field of a stored spot may be missing: documents are written by
//! different client versions and by hand. The conversions into the domain
//! entities fill in the defaults.

use serde::{Deserialize, Serialize};

#[rustfmt::skip]
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpotRecord {
    pub name                    : Option<String>,
    pub location                : Option<String>,
    pub category                : Option<String>,
    pub price_level             : Option<i64>,
    pub description             : Option<String>,
    pub rating                  : Option<f64>,
    pub total_votes             : Option<i64>,
    pub upvotes                 : Option<i64>,
    pub downvotes               : Option<i64>,
    pub tags                    : Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url               : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates             : Option<GeoPointRecord>,
    pub pet_friendly            : Option<bool>,
    pub created_at              : Option<RawTimestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by              : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_display_name : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "createdByPhotoURL")]
    pub created_by_photo_url    : Option<String>,
}

/// A stored spot together with its document key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotDocument {
    pub id: String,
    #[serde(flatten)]
    pub record: SpotRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPointRecord {
    pub latitude: f64,
    pub longitude: f64,
}

/// The different shapes a timestamp has been stored with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Seconds { seconds: i64, nanoseconds: u32 },
    Millis(i64),
    Text(String),
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub id          : String,
    pub user_id     : String,
    pub date_spot_id: String,
    pub vote_type   : String,
    pub created_at  : Option<RawTimestamp>,
}

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use conv::InvalidVoteRecord;
