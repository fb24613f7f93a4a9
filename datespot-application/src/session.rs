use super::*;
use std::sync::Arc;
use tokio::{sync::watch, task::JoinHandle};
use usecases::{UserVoteIndex, VoteTransition};

/// What the auth provider currently knows about the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Not resolved yet.
    #[default]
    Loading,
    SignedOut,
    SignedIn(User),
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) => Some(user),
            Self::Loading | Self::SignedOut => None,
        }
    }
}

/// The session of a single client.
///
/// While a user is signed in their votes are kept in sync with the
/// store by a background task that is stopped on sign-out.
pub struct Session {
    votes_repo: Arc<dyn VoteRepo>,
    auth: watch::Sender<AuthState>,
    // None until the first snapshot arrived
    votes: watch::Sender<Option<UserVoteIndex>>,
    vote_sync: Option<JoinHandle<()>>,
}

impl Session {
    pub fn new(votes_repo: Arc<dyn VoteRepo>) -> Self {
        let (auth, _) = watch::channel(AuthState::Loading);
        let (votes, _) = watch::channel(None);
        Self {
            votes_repo,
            auth,
            votes,
            vote_sync: None,
        }
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.auth.borrow().user().cloned()
    }

    pub fn watch_auth(&self) -> watch::Receiver<AuthState> {
        self.auth.subscribe()
    }

    pub fn watch_votes(&self) -> watch::Receiver<Option<UserVoteIndex>> {
        self.votes.subscribe()
    }

    /// The votes of the signed-in user, empty while not loaded.
    pub fn user_votes(&self) -> UserVoteIndex {
        self.votes.borrow().clone().unwrap_or_default()
    }

    pub async fn sign_in(&mut self, user: User) {
        self.stop_vote_sync().await;
        info!("Signed in as {}", user.id);
        let subscription = self.votes_repo.subscribe_votes_of_user(user.id.as_str());
        let task = tokio::spawn(sync_votes(
            user.id.clone(),
            subscription,
            self.votes.clone(),
        ));
        self.vote_sync = Some(task);
        self.auth.send_replace(AuthState::SignedIn(user));
    }

    /// Also resolves the initial `Loading` state if nobody is signed in.
    pub async fn sign_out(&mut self) {
        self.stop_vote_sync().await;
        if let Some(user) = self.current_user() {
            info!("Signed out {}", user.id);
        }
        self.auth.send_replace(AuthState::SignedOut);
    }

    /// Waits until the votes of the signed-in user have been loaded.
    ///
    /// Returns `false` if nobody is signed in.
    pub async fn votes_loaded(&self) -> bool {
        if self.current_user().is_none() {
            return false;
        }
        let mut rx = self.votes.subscribe();
        let loaded = rx.wait_for(Option::is_some).await.is_ok();
        loaded
    }

    /// Applies a committed transition before the store pushes
    /// the next snapshot.
    pub(crate) fn apply_vote(&self, spot_id: &Id, transition: VoteTransition) {
        self.votes.send_if_modified(|votes| match votes {
            Some(index) => {
                index.apply(spot_id, transition);
                true
            }
            None => false,
        });
    }

    async fn stop_vote_sync(&mut self) {
        if let Some(task) = self.vote_sync.take() {
            task.abort();
            // The subscription is dropped with the task
            let _ = task.await;
        }
        self.votes.send_replace(None);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(task) = self.vote_sync.take() {
            task.abort();
        }
    }
}

async fn sync_votes(
    user_id: Id,
    mut subscription: Subscription<Vote>,
    votes: watch::Sender<Option<UserVoteIndex>>,
) {
    while let Some(event) = subscription.next().await {
        match event {
            SnapshotEvent::Snapshot(snapshot) => {
                debug!("Received {} votes of user {}", snapshot.len(), user_id);
                votes.send_replace(Some(UserVoteIndex::from_votes(snapshot)));
            }
            SnapshotEvent::Failed(reason) => {
                error!("Vote subscription of user {} failed: {}", user_id, reason);
                break;
            }
        }
    }
    debug!("Stopped syncing the votes of user {}", user_id);
}
