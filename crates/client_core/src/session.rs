use std::sync::Arc;

use interpreter::{DescriptionClassifier, KeywordClassifier};
use scene_store::{SceneStore, StoreError};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, info, warn};

/// Ties a classifier to a scene store. Only the most recent submission is
/// ever applied: submitting again cancels whatever is still in flight.
pub struct DesignSession {
    store: SceneStore,
    classifier: Arc<dyn DescriptionClassifier>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl DesignSession {
    pub fn new(store: SceneStore, classifier: Arc<dyn DescriptionClassifier>) -> Self {
        Self {
            store,
            classifier,
            in_flight: Mutex::new(None),
        }
    }

    /// Keyword classifier with its default latency.
    pub fn with_keyword_classifier(store: SceneStore) -> Self {
        Self::new(store, Arc::new(KeywordClassifier::default()))
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    /// Starts interpreting `description` in the background and returns
    /// immediately. The result is merged into the store when ready unless a
    /// newer submission arrives first.
    pub async fn submit(&self, description: impl Into<String>) {
        let description = description.into();
        let store = self.store.clone();
        let classifier = Arc::clone(&self.classifier);

        let mut in_flight = self.in_flight.lock().await;
        supersede(&mut in_flight);
        *in_flight = Some(tokio::spawn(async move {
            let patch = classifier.classify(&description).await;
            match store.apply_interpreted_configuration(patch).await {
                Ok(()) => info!(chars = description.chars().count(), "description applied"),
                Err(error) => warn!(%error, "interpreted configuration rejected"),
            }
        }));
    }

    /// Interprets and applies in the caller's task, cancelling any
    /// background submission first.
    pub async fn interpret_and_apply(&self, description: &str) -> Result<(), StoreError> {
        supersede(&mut *self.in_flight.lock().await);
        let patch = self.classifier.classify(description).await;
        self.store.apply_interpreted_configuration(patch).await
    }

    pub async fn is_interpreting(&self) -> bool {
        self.in_flight
            .lock()
            .await
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Waits for the current background submission, if any.
    pub async fn settle(&self) {
        let task = self.in_flight.lock().await.take();
        if let Some(task) = task {
            if let Err(error) = task.await {
                if !error.is_cancelled() {
                    warn!(%error, "interpretation task failed");
                }
            }
        }
    }
}

impl Drop for DesignSession {
    fn drop(&mut self) {
        supersede(self.in_flight.get_mut());
    }
}

fn supersede(slot: &mut Option<JoinHandle<()>>) {
    if let Some(previous) = slot.take() {
        if !previous.is_finished() {
            debug!("superseding in-flight interpretation");
            previous.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
