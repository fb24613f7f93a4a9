use strum::{AsRefStr, Display, EnumString};

use crate::{id::*, time::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

/// What a user asks for when clicking a vote button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum VoteAction {
    Up,
    Down,
    Remove,
}

impl From<VoteType> for VoteAction {
    fn from(from: VoteType) -> Self {
        match from {
            VoteType::Up => Self::Up,
            VoteType::Down => Self::Down,
        }
    }
}

/// The single vote of a user on a spot.
///
/// At most one record exists per `(user_id, spot_id)` pair.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub id         : Id,
    pub user_id    : Id,
    pub spot_id    : Id,
    pub vote_type  : VoteType,
    pub created_at : Timestamp,
}

/// Signed change of the up/down counters of a spot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CounterDelta {
    pub up: i32,
    pub down: i32,
}

impl CounterDelta {
    pub const fn increment(vote_type: VoteType) -> Self {
        match vote_type {
            VoteType::Up => Self { up: 1, down: 0 },
            VoteType::Down => Self { up: 0, down: 1 },
        }
    }

    pub const fn decrement(vote_type: VoteType) -> Self {
        match vote_type {
            VoteType::Up => Self { up: -1, down: 0 },
            VoteType::Down => Self { up: 0, down: -1 },
        }
    }

    pub const fn is_zero(self) -> bool {
        self.up == 0 && self.down == 0
    }
}

impl std::ops::Add for CounterDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            up: self.up + rhs.up,
            down: self.down + rhs.down,
        }
    }
}

/// Aggregated up/down counters of a spot. Never negative.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VoteCounts {
    pub upvotes: u32,
    pub downvotes: u32,
}

impl VoteCounts {
    pub const fn new(upvotes: u32, downvotes: u32) -> Self {
        Self { upvotes, downvotes }
    }

    pub fn net(self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }

    pub fn total(self) -> u64 {
        u64::from(self.upvotes) + u64::from(self.downvotes)
    }

    pub fn get(self, vote_type: VoteType) -> u32 {
        match vote_type {
            VoteType::Up => self.upvotes,
            VoteType::Down => self.downvotes,
        }
    }

    /// Applies signed deltas, saturating at 0.
    pub fn apply(self, delta: CounterDelta) -> Self {
        let CounterDelta { up, down } = delta;
        Self {
            upvotes: apply_delta(self.upvotes, up),
            downvotes: apply_delta(self.downvotes, down),
        }
    }
}

fn apply_delta(count: u32, delta: i32) -> u32 {
    if delta.is_negative() {
        count.saturating_sub(delta.unsigned_abs())
    } else {
        count.saturating_add(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vote_action() {
        assert_eq!("up".parse::<VoteAction>(), Ok(VoteAction::Up));
        assert_eq!("remove".parse::<VoteAction>(), Ok(VoteAction::Remove));
        assert!("sideways".parse::<VoteAction>().is_err());
        assert_eq!(VoteType::Down.as_ref(), "down");
    }

    #[test]
    fn counters_never_drop_below_zero() {
        let both_down =
            CounterDelta::decrement(VoteType::Up) + CounterDelta::decrement(VoteType::Down);
        let counts = VoteCounts::default().apply(both_down);
        assert_eq!(counts, VoteCounts::new(0, 0));
        let switch =
            CounterDelta::decrement(VoteType::Up) + CounterDelta::increment(VoteType::Down);
        let counts = VoteCounts::new(1, 0).apply(switch);
        assert_eq!(counts, VoteCounts::new(0, 1));
        assert!(CounterDelta::default().is_zero());
    }

    #[test]
    fn net_and_total() {
        let counts = VoteCounts::new(3, 5);
        assert_eq!(counts.net(), -2);
        assert_eq!(counts.total(), 8);
        assert_eq!(counts.get(VoteType::Down), 5);
    }
}
