//! Integration tests for live roster subscriptions over the SQLite store.

use std::sync::Arc;
use std::time::Duration;

use athletehub::athletes::{AthleteDraft, AthleteGateway, AthleteRecord, SaveOutcome, ATHLETES};
use athletehub::storage::{DocumentStore, SqliteStore};
use athletehub::ui::screens::RosterFeed;

fn draft(name: &str) -> AthleteDraft {
    AthleteDraft {
        name: name.to_string(),
        email: format!("{}@club.org", name.to_lowercase()),
        age: "20".to_string(),
        sport: "Football".to_string(),
        matches_played: "3".to_string(),
        ..AthleteDraft::default()
    }
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test]
async fn test_snapshots_follow_writes_in_store_order() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let gateway = AthleteGateway::new(Arc::clone(&store));

    let mut subscription = gateway.subscribe().unwrap();
    subscription.start(|_| {}).unwrap();
    wait_until(|| subscription.revision() >= 1).await;
    assert!(subscription.latest().is_empty());

    gateway.save(&draft("Ana"), None).await.unwrap();
    gateway.save(&draft("Bo"), None).await.unwrap();
    wait_until(|| subscription.latest().len() == 2).await;

    let records = AthleteRecord::from_snapshot(&subscription.latest());
    let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bo"]);
}

#[tokio::test]
async fn test_stop_releases_store_subscription() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let gateway = AthleteGateway::new(Arc::clone(&store));

    let mut subscription = gateway.subscribe().unwrap();
    subscription.start(|_| {}).unwrap();
    assert_eq!(store.subscriber_count(ATHLETES), 1);

    drop(subscription);
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Closed receivers are pruned on the next write
    gateway.save(&draft("Ana"), None).await.unwrap();
    assert_eq!(store.subscriber_count(ATHLETES), 0);
}

#[tokio::test]
async fn test_roster_feed_polls_new_snapshots_once() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let gateway = AthleteGateway::new(Arc::clone(&store));
    let ctx = egui::Context::default();

    let mut feed = RosterFeed::default();
    feed.open(&gateway, &ctx).unwrap();
    assert!(feed.is_open());

    let Ok(SaveOutcome::Created(id)) = gateway.save(&draft("Ana"), None).await else {
        panic!("expected a create");
    };

    let mut records = Vec::new();
    wait_until(|| {
        if let Some(latest) = feed.poll() {
            records = latest;
        }
        records.len() == 1
    })
    .await;
    assert_eq!(records[0].id, id);
    assert!(feed.poll().is_none());

    gateway.delete(&id).await.unwrap();
    assert!(store.get_document(ATHLETES, &id).await.unwrap().is_none());
    wait_until(|| feed.poll().is_some_and(|latest| latest.is_empty())).await;
}
