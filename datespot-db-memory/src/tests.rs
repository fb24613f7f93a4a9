use super::*;
use datespot_core::repositories::{
    Error, SnapshotEvent, SpotRepo, Subscription, VoteCommit, VoteRepo,
};
use datespot_entities::builders::*;

fn commit(
    user_id: &str,
    spot_id: &str,
    expected: Option<VoteType>,
    next: Option<VoteType>,
) -> VoteCommit {
    let delta = expected.map(CounterDelta::decrement).unwrap_or_default()
        + next.map(CounterDelta::increment).unwrap_or_default();
    VoteCommit {
        user_id: user_id.into(),
        spot_id: spot_id.into(),
        expected,
        next,
        delta,
        at: Timestamp::now(),
    }
}

fn temp_snapshot_file() -> PathBuf {
    std::env::temp_dir().join(format!("datespots-{}.json", Id::new()))
}

fn expect_snapshot<T: std::fmt::Debug>(event: Option<SnapshotEvent<T>>) -> Vec<T> {
    match event {
        Some(SnapshotEvent::Snapshot(items)) => items,
        other => panic!("expected a snapshot, got {other:?}"),
    }
}

#[tokio::test]
async fn create_and_get_spot() {
    let db = MemoryStore::new();
    let spot = Spot::build().id("s1").name("Vinga").finish();
    db.create_spot(spot.clone()).await.unwrap();
    assert_eq!(db.get_spot("s1").await.unwrap(), spot);
    assert_eq!(db.count_spots().await.unwrap(), 1);
    assert!(matches!(
        db.create_spot(spot).await,
        Err(Error::AlreadyExists)
    ));
    assert!(matches!(db.get_spot("s2").await, Err(Error::NotFound)));
}

#[tokio::test]
async fn all_spots_newest_first() {
    let db = MemoryStore::new();
    for (id, millis) in [("a", 1_000), ("b", 3_000), ("c", 2_000)] {
        db.create_spot(
            Spot::build()
                .id(id)
                .created_at(Timestamp::from_millis(millis).unwrap())
                .finish(),
        )
        .await
        .unwrap();
    }
    let ids: Vec<_> = db
        .all_spots()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id.to_string())
        .collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
}

#[tokio::test]
async fn update_rating_with_compare_and_swap() {
    let db = MemoryStore::new();
    db.create_spot(Spot::build().id("s1").finish()).await.unwrap();
    let summary = RatingSummary::default().add(RatingValue::max());
    db.update_rating("s1", 0, summary).await.unwrap();
    assert_eq!(db.get_spot("s1").await.unwrap().rating_summary(), summary);
    // stale version
    assert!(matches!(
        db.update_rating("s1", 0, summary).await,
        Err(Error::InvalidVersion)
    ));
    assert!(matches!(
        db.update_rating("s2", 0, summary).await,
        Err(Error::NotFound)
    ));
}

#[tokio::test]
async fn commit_votes() {
    let db = MemoryStore::new();
    db.create_spot(Spot::build().id("s1").finish()).await.unwrap();

    let counts = db
        .commit_vote(commit("u1", "s1", None, Some(VoteType::Up)))
        .await
        .unwrap();
    assert_eq!(counts, VoteCounts::new(1, 0));
    let vote = db.get_vote("u1", "s1").await.unwrap().unwrap();
    assert_eq!(vote.vote_type, VoteType::Up);

    let counts = db
        .commit_vote(commit("u1", "s1", Some(VoteType::Up), Some(VoteType::Down)))
        .await
        .unwrap();
    assert_eq!(counts, VoteCounts::new(0, 1));
    let switched = db.get_vote("u1", "s1").await.unwrap().unwrap();
    assert_eq!(switched.id, vote.id);
    assert_eq!(switched.vote_type, VoteType::Down);

    let counts = db
        .commit_vote(commit("u1", "s1", Some(VoteType::Down), None))
        .await
        .unwrap();
    assert_eq!(counts, VoteCounts::new(0, 0));
    assert!(db.get_vote("u1", "s1").await.unwrap().is_none());
    assert_eq!(db.get_spot("s1").await.unwrap().vote_counts(), counts);
}

#[tokio::test]
async fn reject_commit_with_unexpected_vote() {
    let db = MemoryStore::new();
    db.create_spot(Spot::build().id("s1").finish()).await.unwrap();
    db.commit_vote(commit("u1", "s1", None, Some(VoteType::Up)))
        .await
        .unwrap();
    assert!(matches!(
        db.commit_vote(commit("u1", "s1", None, Some(VoteType::Up)))
            .await,
        Err(Error::InvalidVersion)
    ));
    assert!(matches!(
        db.commit_vote(commit("u1", "s1", Some(VoteType::Down), None))
            .await,
        Err(Error::InvalidVersion)
    ));
    assert_eq!(
        db.get_spot("s1").await.unwrap().vote_counts(),
        VoteCounts::new(1, 0)
    );
    assert!(matches!(
        db.commit_vote(commit("u1", "s2", None, Some(VoteType::Up)))
            .await,
        Err(Error::NotFound)
    ));
}

#[tokio::test]
async fn counters_saturate_at_zero() {
    let db = MemoryStore::new();
    db.create_spot(Spot::build().id("s1").votes(0, 0).finish())
        .await
        .unwrap();
    db.commit_vote(VoteCommit {
        delta: CounterDelta::default(),
        ..commit("u1", "s1", None, Some(VoteType::Up))
    })
    .await
    .unwrap();
    let counts = db
        .commit_vote(commit("u1", "s1", Some(VoteType::Up), None))
        .await
        .unwrap();
    assert_eq!(counts, VoteCounts::new(0, 0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_voters() {
    let db = MemoryStore::new();
    db.create_spot(Spot::build().id("s1").finish()).await.unwrap();
    let tasks: Vec<_> = (0..50)
        .map(|i| {
            let db = db.clone();
            tokio::spawn(async move {
                let user_id = format!("u{i}");
                let vote_type = if i % 5 == 0 {
                    VoteType::Down
                } else {
                    VoteType::Up
                };
                db.commit_vote(commit(&user_id, "s1", None, Some(vote_type)))
                    .await
                    .unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }
    assert_eq!(
        db.get_spot("s1").await.unwrap().vote_counts(),
        VoteCounts::new(40, 10)
    );
}

#[tokio::test]
async fn spot_subscription() {
    let db = MemoryStore::new();
    let mut sub = db.subscribe_spots();
    assert!(expect_snapshot(sub.next().await).is_empty());

    db.create_spot(Spot::build().id("s1").finish()).await.unwrap();
    assert_eq!(expect_snapshot(sub.next().await).len(), 1);

    db.commit_vote(commit("u1", "s1", None, Some(VoteType::Up)))
        .await
        .unwrap();
    let spots = expect_snapshot(sub.next().await);
    assert_eq!(spots[0].upvotes, 1);
    assert!(sub.try_next().is_none());

    assert_eq!(db.subscriber_count(), 1);
    drop(sub);
    assert_eq!(db.subscriber_count(), 0);
    db.create_spot(Spot::build().id("s2").finish()).await.unwrap();
}

#[tokio::test]
async fn vote_subscription_is_filtered_by_user() {
    let db = MemoryStore::new();
    db.create_spot(Spot::build().id("s1").finish()).await.unwrap();
    let mut mine = db.subscribe_votes_of_user("u1");
    let mut theirs = db.subscribe_votes_of_user("u2");
    assert!(expect_snapshot(mine.next().await).is_empty());
    assert!(expect_snapshot(theirs.next().await).is_empty());

    db.commit_vote(commit("u1", "s1", None, Some(VoteType::Down)))
        .await
        .unwrap();
    let votes = expect_snapshot(mine.next().await);
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].vote_type, VoteType::Down);
    assert!(theirs.try_next().is_none());
}

#[tokio::test]
async fn disconnect_fails_subscriptions() {
    let db = MemoryStore::new();
    let mut spots = db.subscribe_spots();
    let mut votes: Subscription<Vote> = db.subscribe_votes_of_user("u1");
    expect_snapshot(spots.next().await);
    expect_snapshot(votes.next().await);
    db.disconnect("connection lost");
    assert_eq!(
        spots.next().await,
        Some(SnapshotEvent::Failed("connection lost".into()))
    );
    assert!(spots.next().await.is_none());
    assert!(matches!(votes.next().await, Some(SnapshotEvent::Failed(_))));
    assert_eq!(db.subscriber_count(), 0);
}

#[tokio::test]
async fn persist_snapshot_file() {
    let path = temp_snapshot_file();
    {
        let db = MemoryStore::open(&path).unwrap();
        db.create_spot(
            Spot::build()
                .id("s1")
                .name("Sjömanstornet")
                .pos(MapPoint::from_lat_lng_deg(57.6995, 11.9321))
                .finish(),
        )
        .await
        .unwrap();
        db.commit_vote(commit("u1", "s1", None, Some(VoteType::Up)))
            .await
            .unwrap();
    }
    let db = MemoryStore::open(&path).unwrap();
    let spot = db.get_spot("s1").await.unwrap();
    assert_eq!(spot.name, "Sjömanstornet");
    assert_eq!(spot.upvotes, 1);
    assert!(spot.coordinates.is_some());
    let vote = db.get_vote("u1", "s1").await.unwrap().unwrap();
    assert_eq!(vote.vote_type, VoteType::Up);
    std::fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn discard_changes_that_cannot_be_written() {
    let dir = std::env::temp_dir().join(format!("datespots-{}", Id::new()));
    std::fs::create_dir(&dir).unwrap();
    let db = MemoryStore::open(dir.join("store.json")).unwrap();
    db.create_spot(Spot::build().id("s1").finish()).await.unwrap();
    db.commit_vote(commit("u1", "s1", None, Some(VoteType::Up)))
        .await
        .unwrap();
    let mut spots = db.subscribe_spots();
    expect_snapshot(spots.next().await);
    std::fs::remove_dir_all(&dir).unwrap();

    assert!(matches!(
        db.create_spot(Spot::build().id("s2").finish()).await,
        Err(Error::Io(_))
    ));
    assert!(matches!(db.get_spot("s2").await, Err(Error::NotFound)));

    let summary = RatingSummary::default().add(RatingValue::max());
    assert!(matches!(
        db.update_rating("s1", 0, summary).await,
        Err(Error::Io(_))
    ));
    assert_eq!(
        db.get_spot("s1").await.unwrap().rating_summary(),
        RatingSummary::default()
    );

    assert!(matches!(
        db.commit_vote(commit("u1", "s1", Some(VoteType::Up), Some(VoteType::Down)))
            .await,
        Err(Error::Io(_))
    ));
    assert!(matches!(
        db.commit_vote(commit("u2", "s1", None, Some(VoteType::Down)))
            .await,
        Err(Error::Io(_))
    ));
    let spot = db.get_spot("s1").await.unwrap();
    assert_eq!((spot.upvotes, spot.downvotes), (1, 0));
    let vote = db.get_vote("u1", "s1").await.unwrap().unwrap();
    assert_eq!(vote.vote_type, VoteType::Up);
    assert!(db.get_vote("u2", "s1").await.unwrap().is_none());

    // Subscribers never saw the discarded changes
    assert!(spots.try_next().is_none());
}

#[test]
fn load_raw_documents() {
    let path = temp_snapshot_file();
    std::fs::write(
        &path,
        r#"{
            "spots": [
                { "id": "1", "name": "Liseberg", "upvotes": -3, "tags": [] },
                { "id": "2", "name": "Avenyn", "createdAt": { "seconds": 1705276800, "nanoseconds": 0 } }
            ],
            "votes": [
                { "id": "v1", "userId": "u1", "dateSpotId": "1", "voteType": "up", "createdAt": null },
                { "id": "v2", "userId": "u1", "dateSpotId": "2", "voteType": "sideways", "createdAt": null }
            ]
        }"#,
    )
    .unwrap();
    let db = MemoryStore::open(&path).unwrap();
    let state = db.shared();
    let liseberg = &state.spots[&Id::from("1")];
    assert_eq!(liseberg.upvotes, 0);
    assert_eq!(liseberg.tags, vec!["date spot"]);
    assert_eq!(
        state.spots[&Id::from("2")].created_at.into_millis(),
        1_705_276_800_000
    );
    assert_eq!(state.votes.len(), 1);
    drop(state);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn open_empty_file() {
    let path = temp_snapshot_file();
    std::fs::write(&path, "").unwrap();
    let db = MemoryStore::open(&path).unwrap();
    assert!(db.shared().spots.is_empty());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn reject_corrupt_file() {
    let path = temp_snapshot_file();
    std::fs::write(&path, "{ not json").unwrap();
    assert!(MemoryStore::open(&path).is_err());
    std::fs::remove_file(&path).unwrap();
}
