use super::*;
use tokio::{sync::watch, task::JoinHandle};

/// The message shown instead of the list if the subscription failed.
pub const FEED_ERROR_MESSAGE: &str = "Failed to load date spots";

#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    /// Newest first.
    pub spots: Vec<Spot>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            spots: vec![],
            loading: true,
            error: None,
        }
    }
}

/// The live list of all spots.
pub struct SpotFeed {
    state: watch::Receiver<FeedState>,
    task: JoinHandle<()>,
}

impl SpotFeed {
    /// Subscribes to the store. Must be called within a runtime.
    pub fn start<R>(repo: &R) -> Self
    where
        R: SpotRepo + ?Sized,
    {
        let subscription = repo.subscribe_spots();
        let (tx, state) = watch::channel(FeedState::default());
        let task = tokio::spawn(follow_spots(subscription, tx));
        Self { state, task }
    }

    pub fn state(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<FeedState> {
        self.state.clone()
    }

    /// Waits for the first snapshot or failure.
    pub async fn loaded(&self) -> FeedState {
        let mut rx = self.state.clone();
        let loaded = match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            // The task is gone, the last state is all there is
            Err(_) => self.state(),
        };
        loaded
    }
}

impl Drop for SpotFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn follow_spots(mut subscription: Subscription<Spot>, state: watch::Sender<FeedState>) {
    while let Some(event) = subscription.next().await {
        match event {
            SnapshotEvent::Snapshot(spots) => {
                debug!("Received {} spots", spots.len());
                state.send_replace(FeedState {
                    spots,
                    loading: false,
                    error: None,
                });
            }
            SnapshotEvent::Failed(reason) => {
                error!("Spot subscription failed: {}", reason);
                state.send_modify(|state| {
                    state.loading = false;
                    state.error = Some(FEED_ERROR_MESSAGE.to_owned());
                });
                return;
            }
        }
    }
}
