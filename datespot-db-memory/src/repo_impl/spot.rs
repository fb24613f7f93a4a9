use super::*;

#[async_trait]
impl SpotRepo for MemoryStore {
    async fn create_spot(&self, spot: Spot) -> Result<()> {
        let mut state = self.exclusive();
        if state.spots.contains_key(&spot.id) {
            return Err(Error::AlreadyExists);
        }
        log::debug!("Inserting spot {}", spot.id);
        let id = spot.id.clone();
        state.spots.insert(id.clone(), spot);
        if let Err(err) = self.persist(&state) {
            state.spots.remove(&id);
            return Err(err);
        }
        state.notify_spot_subscribers();
        Ok(())
    }

    async fn get_spot(&self, id: &str) -> Result<Spot> {
        self.shared().spots.get(id).cloned().ok_or(Error::NotFound)
    }

    async fn all_spots(&self) -> Result<Vec<Spot>> {
        Ok(self.shared().sorted_spots())
    }

    async fn count_spots(&self) -> Result<usize> {
        Ok(self.shared().spots.len())
    }

    async fn update_rating(
        &self,
        id: &str,
        expected_total_votes: u32,
        summary: RatingSummary,
    ) -> Result<()> {
        let mut state = self.exclusive();
        let spot = state.spots.get_mut(id).ok_or(Error::NotFound)?;
        if spot.total_votes != expected_total_votes {
            log::debug!(
                "Rating of spot {} has {} votes instead of {}",
                id,
                spot.total_votes,
                expected_total_votes
            );
            return Err(Error::InvalidVersion);
        }
        let previous = spot.rating_summary();
        spot.set_rating_summary(summary);
        if let Err(err) = self.persist(&state) {
            if let Some(spot) = state.spots.get_mut(id) {
                spot.set_rating_summary(previous);
            }
            return Err(err);
        }
        state.notify_spot_subscribers();
        Ok(())
    }

    fn subscribe_spots(&self) -> Subscription<Spot> {
        let (tx, rx) = Subscription::channel();
        let mut state = self.exclusive();
        if tx.publish(state.sorted_spots()) {
            state.spot_subscribers.push(tx);
        }
        rx
    }
}
