use thiserror::Error;

use crate::{category::*, geo::*, id::*, rating::*, time::*, vote::*};

/// Price indication from 1 (`$`) to 4 (`$$$$`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriceLevel(u8);

impl PriceLevel {
    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(4)
    }

    pub const fn default() -> Self {
        Self(2)
    }

    pub fn display(self) -> String {
        "$".repeat(usize::from(self.0))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Price level out of range: {0}")]
pub struct PriceLevelOutOfRange(pub i64);

impl TryFrom<i64> for PriceLevel {
    type Error = PriceLevelOutOfRange;
    fn try_from(from: i64) -> Result<Self, Self::Error> {
        match from {
            1..=4 => Ok(Self(from as u8)),
            _ => Err(PriceLevelOutOfRange(from)),
        }
    }
}

impl From<PriceLevel> for u8 {
    fn from(from: PriceLevel) -> Self {
        from.0
    }
}

/// Who created a spot.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub user_id      : Id,
    pub display_name : Option<String>,
    pub photo_url    : Option<String>,
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Spot {
    pub id           : Id,
    pub name         : String,
    pub location     : String,
    pub category     : Category,
    pub price_level  : PriceLevel,
    pub description  : String,
    pub rating       : AvgRatingValue,
    pub total_votes  : u32,
    pub upvotes      : u32,
    pub downvotes    : u32,
    pub tags         : Vec<String>,
    pub image_url    : Option<String>,
    pub coordinates  : Option<MapPoint>,
    pub pet_friendly : bool,
    pub created_at   : Timestamp,
    pub created_by   : Option<Creator>,
}

impl Spot {
    /// Tag assigned to spots that have been submitted without any tags.
    pub const DEFAULT_TAG: &'static str = "date spot";

    pub fn default_tags() -> Vec<String> {
        vec![Self::DEFAULT_TAG.to_owned()]
    }

    pub fn vote_counts(&self) -> VoteCounts {
        VoteCounts::new(self.upvotes, self.downvotes)
    }

    pub fn set_vote_counts(&mut self, counts: VoteCounts) {
        let VoteCounts { upvotes, downvotes } = counts;
        self.upvotes = upvotes;
        self.downvotes = downvotes;
    }

    pub fn rating_summary(&self) -> RatingSummary {
        RatingSummary {
            rating: self.rating,
            total_votes: self.total_votes,
        }
    }

    pub fn set_rating_summary(&mut self, summary: RatingSummary) {
        let RatingSummary {
            rating,
            total_votes,
        } = summary;
        self.rating = rating;
        self.total_votes = total_votes;
    }

    pub fn net_votes(&self) -> i64 {
        self.vote_counts().net()
    }

    pub fn created_by_user(&self) -> Option<&Id> {
        self.created_by.as_ref().map(|c| &c.user_id)
    }
}
