use crate::{entities::*, gateways::sentiment::SentimentGateway, repositories::*};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};


use self::builders::Builder;

pub mod prelude {
    pub use super::{builders::*, FixedSentiment, MockDb};
    pub use crate::{
        entities::*,
        repositories::{Error as RepoError, SpotRepo, VoteRepo},
        usecases::Error,
    };
}

type RepoResult<T> = std::result::Result<T, Error>;

#[derive(Default)]
pub struct MockDb {
    pub spots: Mutex<Vec<Spot>>,
    pub votes: Mutex<Vec<Vote>>,
    rating_conflicts: AtomicUsize,
}

impl MockDb {
    pub fn insert_vote(&self, vote: Vote) {
        self.votes.lock().unwrap().push(vote);
    }

    /// Lets the next `n` rating updates fail as if the spot has been
    /// rated concurrently.
    pub fn fail_next_rating_updates(&self, n: usize) {
        self.rating_conflicts.store(n, Ordering::SeqCst);
    }

    fn sorted_spots(&self) -> Vec<Spot> {
        let mut spots = self.spots.lock().unwrap().clone();
        spots.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        spots
    }

    fn user_votes(&self, user_id: &str) -> Vec<Vote> {
        self.votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.user_id.as_str() == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SpotRepo for MockDb {
    async fn create_spot(&self, spot: Spot) -> RepoResult<()> {
        let mut spots = self.spots.lock().unwrap();
        if spots.iter().any(|s| s.id == spot.id) {
            return Err(Error::AlreadyExists);
        }
        spots.push(spot);
        Ok(())
    }

    async fn get_spot(&self, id: &str) -> RepoResult<Spot> {
        self.spots
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id.as_str() == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn all_spots(&self) -> RepoResult<Vec<Spot>> {
        Ok(self.sorted_spots())
    }

    async fn count_spots(&self) -> RepoResult<usize> {
        Ok(self.spots.lock().unwrap().len())
    }

    async fn update_rating(
        &self,
        id: &str,
        expected_total_votes: u32,
        summary: RatingSummary,
    ) -> RepoResult<()> {
        let mut spots = self.spots.lock().unwrap();
        let spot = spots
            .iter_mut()
            .find(|s| s.id.as_str() == id)
            .ok_or(Error::NotFound)?;
        let conflicts = self.rating_conflicts.load(Ordering::SeqCst);
        if conflicts > 0 {
            self.rating_conflicts.store(conflicts - 1, Ordering::SeqCst);
            return Err(Error::InvalidVersion);
        }
        if spot.total_votes != expected_total_votes {
            return Err(Error::InvalidVersion);
        }
        spot.set_rating_summary(summary);
        Ok(())
    }

    fn subscribe_spots(&self) -> Subscription<Spot> {
        let (tx, rx) = Subscription::channel();
        tx.publish(self.sorted_spots());
        rx
    }
}

#[async_trait]
impl VoteRepo for MockDb {
    async fn get_vote(&self, user_id: &str, spot_id: &str) -> RepoResult<Option<Vote>> {
        Ok(self
            .user_votes(user_id)
            .into_iter()
            .find(|v| v.spot_id.as_str() == spot_id))
    }

    async fn votes_of_user(&self, user_id: &str) -> RepoResult<Vec<Vote>> {
        Ok(self.user_votes(user_id))
    }

    async fn commit_vote(&self, commit: VoteCommit) -> RepoResult<VoteCounts> {
        let mut spots = self.spots.lock().unwrap();
        let mut votes = self.votes.lock().unwrap();
        let spot = spots
            .iter_mut()
            .find(|s| s.id == commit.spot_id)
            .ok_or(Error::NotFound)?;
        let pos = votes
            .iter()
            .position(|v| v.user_id == commit.user_id && v.spot_id == commit.spot_id);
        if pos.map(|i| votes[i].vote_type) != commit.expected {
            return Err(Error::InvalidVersion);
        }
        match (pos, commit.next) {
            (Some(i), Some(vote_type)) => votes[i].vote_type = vote_type,
            (Some(i), None) => {
                votes.remove(i);
            }
            (None, Some(vote_type)) => votes.push(Vote {
                id: Id::new(),
                user_id: commit.user_id,
                spot_id: commit.spot_id,
                vote_type,
                created_at: commit.at,
            }),
            (None, None) => {}
        }
        let counts = spot.vote_counts().apply(commit.delta);
        spot.set_vote_counts(counts);
        Ok(counts)
    }

    fn subscribe_votes_of_user(&self, user_id: &str) -> Subscription<Vote> {
        let (tx, rx) = Subscription::channel();
        tx.publish(self.user_votes(user_id));
        rx
    }
}

/// Answers every request with the same score, or fails if there is none.
pub struct FixedSentiment {
    score: Option<f64>,
    requests: AtomicUsize,
}

impl FixedSentiment {
    pub fn score(score: f64) -> Self {
        Self {
            score: Some(score),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            score: None,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentGateway for FixedSentiment {
    async fn sentiment_score(&self, _text: &str) -> anyhow::Result<f64> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.score
            .ok_or_else(|| anyhow::anyhow!("The sentiment service is unavailable"))
    }
}

#[tokio::test]
async fn mock_db_subscriptions_start_with_a_snapshot() {
    let db = MockDb::default();
    db.create_spot(Spot::build().id("s1").finish()).await.unwrap();
    let mut spots = db.subscribe_spots();
    match spots.next().await {
        Some(SnapshotEvent::Snapshot(snapshot)) => assert_eq!(snapshot.len(), 1),
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(spots.next().await.is_none());
}
