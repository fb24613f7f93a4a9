use super::prelude::*;
use std::collections::HashMap;

/// The change of a single vote record, planned from the vote that is
/// currently stored and the requested action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// Nothing to remove.
    Unchanged,
    /// Create a new record.
    Cast(VoteType),
    /// Delete the existing record, either explicitly or by repeating the vote.
    Retract(VoteType),
    /// Update the existing record in place.
    Switch { from: VoteType, to: VoteType },
}

impl VoteTransition {
    pub fn plan(existing: Option<VoteType>, requested: VoteAction) -> Self {
        let requested = match requested {
            VoteAction::Up => Some(VoteType::Up),
            VoteAction::Down => Some(VoteType::Down),
            VoteAction::Remove => None,
        };
        match (existing, requested) {
            (None, None) => Self::Unchanged,
            (Some(prev), None) => Self::Retract(prev),
            (None, Some(next)) => Self::Cast(next),
            (Some(prev), Some(next)) if prev == next => Self::Retract(prev),
            (Some(from), Some(to)) => Self::Switch { from, to },
        }
    }

    /// The vote that must be stored before the transition.
    pub const fn expected_vote(self) -> Option<VoteType> {
        match self {
            Self::Unchanged | Self::Cast(_) => None,
            Self::Retract(prev) => Some(prev),
            Self::Switch { from, .. } => Some(from),
        }
    }

    /// The vote that is stored after the transition.
    pub const fn resulting_vote(self) -> Option<VoteType> {
        match self {
            Self::Unchanged | Self::Retract(_) => None,
            Self::Cast(next) => Some(next),
            Self::Switch { to, .. } => Some(to),
        }
    }

    pub fn counter_delta(self) -> CounterDelta {
        match self {
            Self::Unchanged => CounterDelta::default(),
            Self::Cast(next) => CounterDelta::increment(next),
            Self::Retract(prev) => CounterDelta::decrement(prev),
            Self::Switch { from, to } => {
                CounterDelta::decrement(from) + CounterDelta::increment(to)
            }
        }
    }
}

/// The votes of the signed-in user, keyed by spot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserVoteIndex(HashMap<Id, VoteType>);

impl UserVoteIndex {
    pub fn from_votes(votes: impl IntoIterator<Item = Vote>) -> Self {
        Self(
            votes
                .into_iter()
                .map(|v| (v.spot_id, v.vote_type))
                .collect(),
        )
    }

    pub fn get(&self, spot_id: &str) -> Option<VoteType> {
        self.0.get(spot_id).copied()
    }

    pub fn apply(&mut self, spot_id: &Id, transition: VoteTransition) {
        match transition.resulting_vote() {
            Some(vote_type) => {
                self.0.insert(spot_id.clone(), vote_type);
            }
            None => {
                self.0.remove(spot_id.as_str());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    pub transition: VoteTransition,
    /// The counters of the spot after the commit, `None` if nothing
    /// has been committed.
    pub counts: Option<VoteCounts>,
}

pub async fn cast_vote<R>(
    repo: &R,
    user: Option<&User>,
    index: &UserVoteIndex,
    spot_id: &Id,
    action: VoteAction,
) -> Result<VoteOutcome>
where
    R: VoteRepo + ?Sized,
{
    let Some(user) = user else {
        return Err(Error::AuthRequired);
    };
    let transition = VoteTransition::plan(index.get(spot_id.as_str()), action);
    if transition == VoteTransition::Unchanged {
        log::debug!("User {} has no vote on spot {} to remove", user.id, spot_id);
        return Ok(VoteOutcome {
            transition,
            counts: None,
        });
    }
    let commit = VoteCommit {
        user_id: user.id.clone(),
        spot_id: spot_id.clone(),
        expected: transition.expected_vote(),
        next: transition.resulting_vote(),
        delta: transition.counter_delta(),
        at: Timestamp::now(),
    };
    match repo.commit_vote(commit).await {
        Ok(counts) => {
            log::debug!(
                "User {} voted on spot {}: {:?} (up: {}, down: {})",
                user.id,
                spot_id,
                transition,
                counts.upvotes,
                counts.downvotes
            );
            Ok(VoteOutcome {
                transition,
                counts: Some(counts),
            })
        }
        Err(RepoError::InvalidVersion) => {
            log::warn!(
                "The vote of user {} on spot {} has been changed concurrently",
                user.id,
                spot_id
            );
            Err(Error::Conflict)
        }
        Err(err) => {
            log::error!(
                "Failed to commit the vote of user {} on spot {}: {}",
                user.id,
                spot_id,
                err
            );
            Err(err.into())
        }
    }
}
