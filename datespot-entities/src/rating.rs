use thiserror::Error;

/// A single rating submission (1 to 5 hearts).
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RatingValue(u8);

impl RatingValue {
    pub const fn min() -> Self {
        Self(1)
    }

    pub const fn max() -> Self {
        Self(5)
    }

    pub fn is_valid(self) -> bool {
        self >= Self::min() && self <= Self::max()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Rating value out of range: {0}")]
pub struct RatingValueOutOfRange(pub i64);

impl TryFrom<i64> for RatingValue {
    type Error = RatingValueOutOfRange;
    fn try_from(from: i64) -> Result<Self, Self::Error> {
        u8::try_from(from)
            .ok()
            .map(Self)
            .filter(|v| v.is_valid())
            .ok_or(RatingValueOutOfRange(from))
    }
}

impl TryFrom<u8> for RatingValue {
    type Error = RatingValueOutOfRange;
    fn try_from(from: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(from))
    }
}

impl From<RatingValue> for u8 {
    fn from(from: RatingValue) -> Self {
        from.0
    }
}

impl From<RatingValue> for f64 {
    fn from(from: RatingValue) -> Self {
        f64::from(from.0)
    }
}

/// Running average of all rating submissions of a spot, within `[0, 5]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct AvgRatingValue(f64);

impl AvgRatingValue {
    pub const fn min() -> Self {
        Self(0.0)
    }

    pub const fn max() -> Self {
        Self(5.0)
    }

    pub fn clamp(self) -> Self {
        if self.0.is_nan() {
            return Self::min();
        }
        Self(self.0.max(Self::min().0).min(Self::max().0))
    }

    pub fn is_valid(self) -> bool {
        self >= Self::min() && self <= Self::max()
    }
}

impl From<f64> for AvgRatingValue {
    fn from(from: f64) -> Self {
        Self(from)
    }
}

impl From<AvgRatingValue> for f64 {
    fn from(from: AvgRatingValue) -> Self {
        from.0
    }
}

impl From<RatingValue> for AvgRatingValue {
    fn from(from: RatingValue) -> Self {
        f64::from(from).into()
    }
}

/// The aggregated rating state of a spot.
///
/// Individual submissions are not retained, so a submission can
/// neither be retracted nor edited once it has been added.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub rating: AvgRatingValue,
    pub total_votes: u32,
}

impl RatingSummary {
    /// The state of a newly created spot, optionally rated by its author.
    pub fn initial(author_rating: Option<RatingValue>) -> Self {
        match author_rating {
            Some(value) => Self {
                rating: value.into(),
                total_votes: 1,
            },
            None => Self::default(),
        }
    }

    /// Adds a submission as a weighted running mean.
    pub fn add(self, value: RatingValue) -> Self {
        debug_assert!(value.is_valid());
        let total = f64::from(self.total_votes);
        let sum = f64::from(self.rating) * total + f64::from(value);
        let total_votes = self.total_votes.saturating_add(1);
        Self {
            rating: AvgRatingValue::from(sum / f64::from(total_votes)).clamp(),
            total_votes,
        }
    }
}

impl std::ops::AddAssign<RatingValue> for RatingSummary {
    fn add_assign(&mut self, rhs: RatingValue) {
        *self = self.add(rhs);
    }
}
