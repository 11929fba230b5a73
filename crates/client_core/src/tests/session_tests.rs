use std::time::Duration;

use async_trait::async_trait;
use shared::domain::{Dimensions, SceneConfigurationPatch};

use super::*;

async fn furniture_types(store: &SceneStore) -> Vec<String> {
    store
        .configuration()
        .await
        .furniture
        .into_iter()
        .map(|item| item.item_type)
        .collect()
}

struct FlatRoomClassifier;

#[async_trait]
impl DescriptionClassifier for FlatRoomClassifier {
    async fn classify(&self, _description: &str) -> SceneConfigurationPatch {
        SceneConfigurationPatch {
            dimensions: Some(Dimensions::new(6.0, 0.0, 6.0)),
            ..Default::default()
        }
    }
}

#[tokio::test(start_paused = true)]
async fn latest_submission_wins() {
    let session = DesignSession::with_keyword_classifier(SceneStore::new());

    session.submit("an office").await;
    tokio::time::sleep(Duration::from_millis(500)).await;
    session.submit("a kitchen").await;
    assert!(session.is_interpreting().await);

    session.settle().await;

    assert!(!session.is_interpreting().await);
    let types = furniture_types(session.store()).await;
    assert!(types.contains(&"cabinet".to_string()));
    assert!(!types.contains(&"desk".to_string()));
    // Only the kitchen result was merged.
    assert_eq!(session.store().version().await, 1);
}

#[tokio::test(start_paused = true)]
async fn submission_waits_for_classifier_latency() {
    let session = DesignSession::with_keyword_classifier(SceneStore::new());
    let started = tokio::time::Instant::now();

    session.submit("a cozy bedroom").await;
    session.settle().await;

    assert!(started.elapsed() >= KeywordClassifier::DEFAULT_LATENCY);
    assert_eq!(
        furniture_types(session.store()).await,
        ["bed", "cabinet", "cabinet", "lamp"]
    );
}

#[tokio::test(start_paused = true)]
async fn inline_interpretation_cancels_background_work() {
    let session = DesignSession::with_keyword_classifier(SceneStore::new());

    session.submit("an office").await;
    session
        .interpret_and_apply("dining room")
        .await
        .expect("apply");
    // Give an uncancelled task every chance to land.
    tokio::time::sleep(KeywordClassifier::DEFAULT_LATENCY * 2).await;

    let types = furniture_types(session.store()).await;
    assert!(!types.contains(&"desk".to_string()));
    assert_eq!(session.store().version().await, 1);
}

#[tokio::test]
async fn invalid_interpretations_are_rejected_by_the_store() {
    let store = SceneStore::new();
    let session = DesignSession::new(store.clone(), Arc::new(FlatRoomClassifier));

    let err = session.interpret_and_apply("anything").await.unwrap_err();

    assert!(matches!(err, StoreError::InvalidDimensions { .. }));
    assert_eq!(store.version().await, 0);
}

#[tokio::test]
async fn settle_without_submission_returns_immediately() {
    let session = DesignSession::new(SceneStore::new(), Arc::new(KeywordClassifier::immediate()));
    session.settle().await;
    assert!(!session.is_interpreting().await);
}
