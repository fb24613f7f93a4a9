use async_trait::async_trait;
use datespot_core::{
    entities::*,
    gateways::{geocode::*, sentiment::*, upload::*},
    repositories::{SpotRepo, VoteRepo},
    usecases::{self, NewSpot, UserVoteIndex},
};
use datespot_db_memory::MemoryStore;
use datespot_entities::builders::*;
use std::{
    sync::{
        atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use crate::prelude::{Session, SpotServices};

pub mod prelude {
    pub use super::{
        new_spot, BackendFixture, CountingSentiment, FakeUpload, SlowSentiment, PLACE_NAME,
        UPLOADED_URL,
    };
    pub use datespot_core::{
        entities::*,
        repositories::{Error as RepoError, SpotRepo, VoteRepo},
    };
}

pub const PLACE_NAME: &str = "Slottsskogen, Göteborg";
pub const UPLOADED_URL: &str = "https://assets.example.com/date-spots/vinga.jpg";

pub fn new_spot(name: &str, location: &str, description: &str) -> NewSpot {
    NewSpot {
        name: name.into(),
        location: location.into(),
        description: description.into(),
        category: Category::default(),
        price_level: PriceLevel::default(),
        tags: vec![],
        image_url: None,
        coordinates: None,
        pet_friendly: false,
        initial_rating: None,
    }
}

pub struct BackendFixture {
    pub db: Arc<MemoryStore>,
    pub sentiment: Arc<CountingSentiment>,
    pub upload: Arc<FakeUpload>,
    /// Creation time of the next spot, advanced by one second per spot.
    clock: AtomicI64,
}

impl BackendFixture {
    pub fn new() -> Self {
        Self::with_sentiment(0.8)
    }

    pub fn with_sentiment(score: f64) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            db: Arc::new(MemoryStore::new()),
            sentiment: Arc::new(CountingSentiment::new(score)),
            upload: Arc::new(FakeUpload::default()),
            clock: AtomicI64::new(1_700_000_000_000),
        }
    }

    pub fn services(&self) -> SpotServices {
        SpotServices {
            sentiment: self.sentiment.clone(),
            geocoding: Arc::new(FixedPlace),
            upload: Some(self.upload.clone()),
        }
    }

    pub fn session(&self) -> Session {
        Session::new(self.db.clone())
    }

    pub async fn signed_in(&self, user_id: &str) -> Session {
        let mut session = self.session();
        session.sign_in(User::new(user_id)).await;
        assert!(session.votes_loaded().await);
        session
    }

    pub async fn create_spot(&self, name: &str, location: &str) -> Id {
        let millis = self.clock.fetch_add(1_000, Ordering::Relaxed);
        let spot = Spot::build()
            .name(name)
            .location(location)
            .created_at(Timestamp::from_millis(millis).unwrap())
            .finish();
        let id = spot.id.clone();
        self.db.create_spot(spot).await.unwrap();
        id
    }

    /// Votes on behalf of another client.
    pub async fn commit_vote(&self, user_id: &str, spot_id: &Id, vote_type: VoteType) {
        let votes = UserVoteIndex::from_votes(self.db.votes_of_user(user_id).await.unwrap());
        usecases::cast_vote(
            &*self.db,
            Some(&User::new(user_id)),
            &votes,
            spot_id,
            vote_type.into(),
        )
        .await
        .unwrap();
    }
}

pub struct CountingSentiment {
    score: f64,
    requests: AtomicUsize,
}

impl CountingSentiment {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentGateway for CountingSentiment {
    async fn sentiment_score(&self, _: &str) -> anyhow::Result<f64> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.score)
    }
}

pub struct SlowSentiment(pub Duration);

#[async_trait]
impl SentimentGateway for SlowSentiment {
    async fn sentiment_score(&self, _: &str) -> anyhow::Result<f64> {
        tokio::time::sleep(self.0).await;
        Ok(1.0)
    }
}

struct FixedPlace;

#[async_trait]
impl ReverseGeocodingGateway for FixedPlace {
    async fn resolve_place_name(&self, _: MapPoint) -> Option<String> {
        Some(PLACE_NAME.into())
    }
}

#[derive(Default)]
pub struct FakeUpload {
    failing: AtomicBool,
    uploads: AtomicUsize,
}

impl FakeUpload {
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetUploadGateway for FakeUpload {
    async fn upload(
        &self,
        asset: Asset,
        progress: &dyn UploadProgress,
    ) -> Result<String, UploadError> {
        if asset.bytes.is_empty() {
            return Err(UploadError::EmptyAsset);
        }
        progress.report(0.5);
        if self.failing.load(Ordering::SeqCst) {
            return Err(UploadError::Rejected("quota exceeded".into()));
        }
        progress.report(1.0);
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(UPLOADED_URL.into())
    }
}
