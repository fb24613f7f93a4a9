use super::*;

#[async_trait]
impl VoteRepo for MemoryStore {
    async fn get_vote(&self, user_id: &str, spot_id: &str) -> Result<Option<Vote>> {
        Ok(self
            .shared()
            .votes
            .get(&vote_key(user_id, spot_id))
            .cloned())
    }

    async fn votes_of_user(&self, user_id: &str) -> Result<Vec<Vote>> {
        Ok(self.shared().votes_of_user(user_id))
    }

    async fn commit_vote(&self, commit: VoteCommit) -> Result<VoteCounts> {
        let VoteCommit {
            user_id,
            spot_id,
            expected,
            next,
            delta,
            at,
        } = commit;
        let mut guard = self.exclusive();
        let state = &mut *guard;
        let spot = state.spots.get_mut(&spot_id).ok_or(Error::NotFound)?;
        let key = (user_id.clone(), spot_id.clone());
        let current = state.votes.get(&key).map(|v| v.vote_type);
        if current != expected {
            log::debug!(
                "Vote of user {} on spot {} is {:?} instead of {:?}",
                user_id,
                spot_id,
                current,
                expected
            );
            return Err(Error::InvalidVersion);
        }
        let previous_vote = state.votes.get(&key).cloned();
        let previous_counts = spot.vote_counts();
        match next {
            Some(vote_type) => {
                state
                    .votes
                    .entry(key.clone())
                    .and_modify(|v| v.vote_type = vote_type)
                    .or_insert_with(|| Vote {
                        id: Id::new(),
                        user_id: user_id.clone(),
                        spot_id: spot_id.clone(),
                        vote_type,
                        created_at: at,
                    });
            }
            None => {
                state.votes.remove(&key);
            }
        }
        let counts = previous_counts.apply(delta);
        spot.set_vote_counts(counts);
        if let Err(err) = self.persist(state) {
            if let Some(spot) = state.spots.get_mut(&spot_id) {
                spot.set_vote_counts(previous_counts);
            }
            match previous_vote {
                Some(vote) => state.votes.insert(key, vote),
                None => state.votes.remove(&key),
            };
            return Err(err);
        }
        state.notify_spot_subscribers();
        state.notify_vote_subscribers(&user_id);
        Ok(counts)
    }

    fn subscribe_votes_of_user(&self, user_id: &str) -> Subscription<Vote> {
        let (tx, rx) = Subscription::channel();
        let mut state = self.exclusive();
        if tx.publish(state.votes_of_user(user_id)) {
            state.vote_subscribers.push((user_id.into(), tx));
        }
        rx
    }
}
