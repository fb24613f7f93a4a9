// Low-level access traits of the remote document store.
// Each repository is responsible for a single collection.
// Related documents are only referenced by their id and never
// modified or loaded by another repository, with the single
// exception of the vote transaction that also updates the
// counters of the voted spot.

use crate::entities::*;
use async_trait::async_trait;
use std::io;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error("The version of the object is invalid")]
    InvalidVersion,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A single push of a realtime subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotEvent<T> {
    /// The complete, current result set of the subscribed query.
    Snapshot(Vec<T>),
    /// The subscription failed; no further snapshots will follow.
    Failed(String),
}

/// Receiving end of a realtime subscription.
///
/// Dropping it unsubscribes from the store.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<SnapshotEvent<T>>,
}

/// Sending end of a realtime subscription, kept by the store.
#[derive(Debug)]
pub struct SubscriptionSender<T> {
    tx: mpsc::UnboundedSender<SnapshotEvent<T>>,
}

impl<T> Subscription<T> {
    pub fn channel() -> (SubscriptionSender<T>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (SubscriptionSender { tx }, Self { rx })
    }

    /// Waits for the next event. Returns `None` after the store
    /// has dropped the sending end.
    pub async fn next(&mut self) -> Option<SnapshotEvent<T>> {
        self.rx.recv().await
    }

    pub fn try_next(&mut self) -> Option<SnapshotEvent<T>> {
        self.rx.try_recv().ok()
    }

    pub fn unsubscribe(mut self) {
        self.rx.close();
    }
}

impl<T> SubscriptionSender<T> {
    /// Returns `false` if the subscriber is gone.
    pub fn publish(&self, snapshot: Vec<T>) -> bool {
        self.tx.send(SnapshotEvent::Snapshot(snapshot)).is_ok()
    }

    pub fn fail(&self, reason: impl Into<String>) -> bool {
        self.tx.send(SnapshotEvent::Failed(reason.into())).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// All changes of a single vote, applied atomically by the store.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteCommit {
    pub user_id  : Id,
    pub spot_id  : Id,
    /// The vote that must currently be stored for the pair (compare-and-swap).
    pub expected : Option<VoteType>,
    /// The vote that will be stored afterwards, `None` deletes the record.
    pub next     : Option<VoteType>,
    pub delta    : CounterDelta,
    pub at       : Timestamp,
}

#[async_trait]
pub trait SpotRepo: Send + Sync {
    async fn create_spot(&self, spot: Spot) -> Result<()>;

    async fn get_spot(&self, id: &str) -> Result<Spot>;

    /// Ordered by creation time, newest first.
    async fn all_spots(&self) -> Result<Vec<Spot>>;

    async fn count_spots(&self) -> Result<usize>;

    /// Replaces the rating aggregate, but only if the spot still
    /// has `expected_total_votes` submissions.
    async fn update_rating(
        &self,
        id: &str,
        expected_total_votes: u32,
        summary: RatingSummary,
    ) -> Result<()>;

    /// Pushes the result of `all_spots` on every change.
    fn subscribe_spots(&self) -> Subscription<Spot>;
}

#[async_trait]
pub trait VoteRepo: Send + Sync {
    async fn get_vote(&self, user_id: &str, spot_id: &str) -> Result<Option<Vote>>;

    async fn votes_of_user(&self, user_id: &str) -> Result<Vec<Vote>>;

    /// Applies the vote record change and the counter delta of the spot
    /// in a single transaction and returns the resulting counters.
    ///
    /// Fails with `InvalidVersion` if the stored vote of the pair
    /// differs from `commit.expected`.
    async fn commit_vote(&self, commit: VoteCommit) -> Result<VoteCounts>;

    /// Pushes the result of `votes_of_user` on every change.
    fn subscribe_votes_of_user(&self, user_id: &str) -> Subscription<Vote>;
}
