use super::*;
use datespot_entities as e;

impl From<RawTimestamp> for e::time::Timestamp {
    fn from(from: RawTimestamp) -> Self {
        let ts = match from {
            RawTimestamp::Seconds {
                seconds,
                nanoseconds,
            } => e::time::Timestamp::from_seconds_and_nanos(seconds, nanoseconds),
            RawTimestamp::Millis(millis) => e::time::Timestamp::from_millis(millis),
            RawTimestamp::Text(text) => e::time::Timestamp::parse_rfc3339(&text),
        };
        ts.unwrap_or_else(e::time::Timestamp::epoch)
    }
}

impl From<e::time::Timestamp> for RawTimestamp {
    fn from(from: e::time::Timestamp) -> Self {
        let millis = from.into_millis();
        Self::Seconds {
            seconds: millis.div_euclid(1000),
            nanoseconds: (millis.rem_euclid(1000) as u32) * 1_000_000,
        }
    }
}

impl From<GeoPointRecord> for e::geo::MapPoint {
    fn from(from: GeoPointRecord) -> Self {
        let GeoPointRecord {
            latitude,
            longitude,
        } = from;
        Self::from_lat_lng_deg(latitude, longitude)
    }
}

impl From<e::geo::MapPoint> for GeoPointRecord {
    fn from(from: e::geo::MapPoint) -> Self {
        Self {
            latitude: from.lat_deg(),
            longitude: from.lng_deg(),
        }
    }
}

fn counter(value: Option<i64>) -> u32 {
    value
        .unwrap_or_default()
        .clamp(0, i64::from(u32::MAX)) as u32
}

impl From<SpotDocument> for e::spot::Spot {
    fn from(from: SpotDocument) -> Self {
        let SpotDocument { id, record } = from;
        let SpotRecord {
            name,
            location,
            category,
            price_level,
            description,
            rating,
            total_votes,
            upvotes,
            downvotes,
            tags,
            image_url,
            coordinates,
            pet_friendly,
            created_at,
            created_by,
            created_by_display_name,
            created_by_photo_url,
        } = record;
        let category = category
            .and_then(|c| c.parse().ok())
            .unwrap_or_else(e::category::Category::default);
        let price_level = price_level
            .and_then(|p| e::spot::PriceLevel::try_from(p).ok())
            .unwrap_or_else(e::spot::PriceLevel::default);
        let rating = e::rating::AvgRatingValue::from(rating.unwrap_or_default()).clamp();
        let tags = tags
            .filter(|tags| !tags.is_empty())
            .unwrap_or_else(e::spot::Spot::default_tags);
        let created_at = created_at
            .map(Into::into)
            .unwrap_or_else(e::time::Timestamp::epoch);
        let created_by = created_by
            .filter(|id| !id.is_empty())
            .map(|user_id| e::spot::Creator {
                user_id: user_id.into(),
                display_name: created_by_display_name,
                photo_url: created_by_photo_url,
            });
        Self {
            id: id.into(),
            name: name.unwrap_or_default(),
            location: location.unwrap_or_default(),
            category,
            price_level,
            description: description.unwrap_or_default(),
            rating,
            total_votes: counter(total_votes),
            upvotes: counter(upvotes),
            downvotes: counter(downvotes),
            tags,
            image_url: image_url.filter(|url| !url.is_empty()),
            coordinates: coordinates.map(Into::into),
            pet_friendly: pet_friendly.unwrap_or_default(),
            created_at,
            created_by,
        }
    }
}

impl From<e::spot::Spot> for SpotDocument {
    fn from(from: e::spot::Spot) -> Self {
        let e::spot::Spot {
            id,
            name,
            location,
            category,
            price_level,
            description,
            rating,
            total_votes,
            upvotes,
            downvotes,
            tags,
            image_url,
            coordinates,
            pet_friendly,
            created_at,
            created_by,
        } = from;
        let (created_by, created_by_display_name, created_by_photo_url) = match created_by {
            Some(e::spot::Creator {
                user_id,
                display_name,
                photo_url,
            }) => (Some(user_id.into()), display_name, photo_url),
            None => (None, None, None),
        };
        let record = SpotRecord {
            name: Some(name),
            location: Some(location),
            category: Some(category.to_string()),
            price_level: Some(u8::from(price_level).into()),
            description: Some(description),
            rating: Some(rating.into()),
            total_votes: Some(total_votes.into()),
            upvotes: Some(upvotes.into()),
            downvotes: Some(downvotes.into()),
            tags: Some(tags),
            image_url,
            coordinates: coordinates.map(Into::into),
            pet_friendly: Some(pet_friendly),
            created_at: Some(created_at.into()),
            created_by,
            created_by_display_name,
            created_by_photo_url,
        };
        Self {
            id: id.into(),
            record,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVoteRecord(pub String);

impl TryFrom<VoteRecord> for e::vote::Vote {
    type Error = InvalidVoteRecord;
    fn try_from(from: VoteRecord) -> Result<Self, Self::Error> {
        let VoteRecord {
            id,
            user_id,
            date_spot_id,
            vote_type,
            created_at,
        } = from;
        let vote_type = vote_type
            .parse()
            .map_err(|_| InvalidVoteRecord(vote_type.clone()))?;
        Ok(Self {
            id: id.into(),
            user_id: user_id.into(),
            spot_id: date_spot_id.into(),
            vote_type,
            created_at: created_at
                .map(Into::into)
                .unwrap_or_else(e::time::Timestamp::epoch),
        })
    }
}

impl From<e::vote::Vote> for VoteRecord {
    fn from(from: e::vote::Vote) -> Self {
        let e::vote::Vote {
            id,
            user_id,
            spot_id,
            vote_type,
            created_at,
        } = from;
        Self {
            id: id.into(),
            user_id: user_id.into(),
            date_spot_id: spot_id.into(),
            vote_type: vote_type.to_string(),
            created_at: Some(created_at.into()),
        }
    }
}
