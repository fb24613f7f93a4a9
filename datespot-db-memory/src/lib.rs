//! In-process document store with the collections `spots` and `votes`.
//!
//! All collections are kept in memory behind a single lock. Every
//! change is pushed to the realtime subscribers and, if configured,
//! written to a JSON snapshot file.

use anyhow::Result as Fallible;
use datespot_core::{
    entities::*,
    repositories::{self as repo, SubscriptionSender},
};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

mod models;
mod repo_impl;

use self::models::StoreSnapshot;

type VoteKey = (Id, Id);

fn vote_key(user_id: &str, spot_id: &str) -> VoteKey {
    (user_id.into(), spot_id.into())
}

#[derive(Debug, Default)]
struct Collections {
    spots: HashMap<Id, Spot>,
    // keyed by (user, spot)
    votes: HashMap<VoteKey, Vote>,
    spot_subscribers: Vec<SubscriptionSender<Spot>>,
    vote_subscribers: Vec<(Id, SubscriptionSender<Vote>)>,
}

impl Collections {
    /// Newest first.
    fn sorted_spots(&self) -> Vec<Spot> {
        let mut spots: Vec<_> = self.spots.values().cloned().collect();
        spots.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        spots
    }

    fn votes_of_user(&self, user_id: &str) -> Vec<Vote> {
        let mut votes: Vec<_> = self
            .votes
            .values()
            .filter(|v| v.user_id.as_str() == user_id)
            .cloned()
            .collect();
        votes.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.spot_id.as_str().cmp(b.spot_id.as_str()))
        });
        votes
    }

    fn notify_spot_subscribers(&mut self) {
        if self.spot_subscribers.is_empty() {
            return;
        }
        let snapshot = self.sorted_spots();
        self.spot_subscribers
            .retain(|subscriber| subscriber.publish(snapshot.clone()));
    }

    fn notify_vote_subscribers(&mut self, user_id: &Id) {
        if !self.vote_subscribers.iter().any(|(uid, _)| uid == user_id) {
            return;
        }
        let snapshot = self.votes_of_user(user_id.as_str());
        self.vote_subscribers.retain(|(uid, subscriber)| {
            if uid != user_id {
                return !subscriber.is_closed();
            }
            subscriber.publish(snapshot.clone())
        });
    }

    fn to_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            spots: self.sorted_spots().into_iter().map(Into::into).collect(),
            votes: self
                .votes
                .values()
                .cloned()
                .map(Into::into)
                .collect(),
        }
    }

    fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let StoreSnapshot { spots, votes } = snapshot;
        let spots: HashMap<_, _> = spots
            .into_iter()
            .map(Spot::from)
            .map(|s| (s.id.clone(), s))
            .collect();
        let mut collections = Self {
            spots,
            ..Default::default()
        };
        for record in votes {
            let vote = match Vote::try_from(record) {
                Ok(vote) => vote,
                Err(err) => {
                    log::warn!("Skipping invalid vote record: {:?}", err);
                    continue;
                }
            };
            let key = (vote.user_id.clone(), vote.spot_id.clone());
            if let Some(prev) = collections.votes.insert(key, vote) {
                log::warn!(
                    "Dropping duplicate vote {} of user {} on spot {}",
                    prev.id,
                    prev.user_id,
                    prev.spot_id
                );
            }
        }
        collections
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<Collections>>,
    snapshot_file: Option<PathBuf>,
}

impl MemoryStore {
    /// A volatile store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that is backed by a JSON snapshot file.
    ///
    /// The file is created on the first change if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Fallible<Self> {
        let path = path.into();
        let collections = if path.exists() {
            let snapshot = read_snapshot(&path)?;
            let collections = Collections::from_snapshot(snapshot);
            log::info!(
                "Loaded {} spots and {} votes from {}",
                collections.spots.len(),
                collections.votes.len(),
                path.display()
            );
            collections
        } else {
            log::info!("Creating a new store at {}", path.display());
            Collections::default()
        };
        Ok(Self {
            state: Arc::new(RwLock::new(collections)),
            snapshot_file: Some(path),
        })
    }

    /// Terminates all realtime subscriptions with an error,
    /// as if the connection to the store has been lost.
    pub fn disconnect(&self, reason: &str) {
        let mut state = self.exclusive();
        log::warn!(
            "Closing {} realtime subscriptions: {}",
            state.spot_subscribers.len() + state.vote_subscribers.len(),
            reason
        );
        for subscriber in state.spot_subscribers.drain(..) {
            subscriber.fail(reason);
        }
        for (_, subscriber) in state.vote_subscribers.drain(..) {
            subscriber.fail(reason);
        }
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        let state = self.shared();
        state
            .spot_subscribers
            .iter()
            .filter(|s| !s.is_closed())
            .count()
            + state
                .vote_subscribers
                .iter()
                .filter(|(_, s)| !s.is_closed())
                .count()
    }

    fn shared(&self) -> RwLockReadGuard<'_, Collections> {
        self.state.read()
    }

    fn exclusive(&self) -> RwLockWriteGuard<'_, Collections> {
        self.state.write()
    }

    fn persist(&self, state: &Collections) -> repo::Result<()> {
        let Some(path) = &self.snapshot_file else {
            return Ok(());
        };
        write_snapshot(path, &state.to_snapshot()).inspect_err(|err| {
            log::error!("Failed to write snapshot file {}: {err}", path.display());
        })
    }
}

fn read_snapshot(path: &Path) -> Fallible<StoreSnapshot> {
    let json = fs::read_to_string(path)?;
    if json.trim().is_empty() {
        return Ok(StoreSnapshot::default());
    }
    Ok(serde_json::from_str(&json)?)
}

fn write_snapshot(path: &Path, snapshot: &StoreSnapshot) -> repo::Result<()> {
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|err| repo::Error::Io(io::Error::new(io::ErrorKind::InvalidData, err)))?;
    // Replace the file atomically
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests;
