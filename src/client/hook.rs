use parking_lot::RwLock;
use serde_json::Value;

use crate::{
    client::{api::PortfolioClient, error::ClientError, resource::Resource},
    entities::{experience::Experience, project::Project},
};

pub type ProjectsHook = CollectionHook<Project>;
pub type ExperiencesHook = CollectionHook<Experience>;

#[derive(Debug, Clone, PartialEq)]
pub struct HookState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> HookState<T> {
    fn pending() -> Self {
        HookState {
            items: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

/// Locally cached copy of one collection.
///
/// Writes go to the API first and are spliced into the cache only when the
/// server accepted them. The lock is never held across a request.
pub struct CollectionHook<R: Resource> {
    client: PortfolioClient,
    state: RwLock<HookState<R>>,
    fallback: Option<Vec<R>>,
}

impl<R: Resource> CollectionHook<R> {
    /// Creates the hook in its loading state without issuing a request.
    pub fn new(client: PortfolioClient) -> Self {
        CollectionHook {
            client,
            state: RwLock::new(HookState::pending()),
            fallback: None,
        }
    }

    /// Items shown instead of an empty list when fetching fails.
    pub fn with_fallback(mut self, fallback: Vec<R>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Creates the hook and runs the initial fetch.
    pub async fn mount(self) -> Self {
        self.refetch().await;
        self
    }

    pub fn snapshot(&self) -> HookState<R> {
        self.state.read().clone()
    }

    pub fn items(&self) -> Vec<R> {
        self.state.read().items.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub async fn refetch(&self) {
        self.state.write().loading = true;

        let result = self.client.list::<R>().await;

        let mut state = self.state.write();
        match result {
            Ok(items) => {
                state.items = items;
                state.error = None;
            }
            Err(err) => {
                tracing::warn!("Error fetching {}: {}", R::COLLECTION, err);
                if let Some(fallback) = &self.fallback {
                    state.items = fallback.clone();
                }
                state.error = Some(err.user_message(&format!("Failed to fetch {}", R::COLLECTION)));
            }
        }
        state.loading = false;
    }

    /// Creates a record and prepends it to the cached list.
    pub async fn add(&self, record: &R::New) -> Result<R, ClientError> {
        let created = self.client.create::<R>(record).await.inspect_err(|err| {
            tracing::error!("Error adding {}: {}", R::LABEL, err);
        })?;

        self.state.write().items.insert(0, created.clone());

        Ok(created)
    }

    /// Sends a patch and merges the returned view into the cached record.
    pub async fn update(&self, id: &str, patch: &R::Patch) -> Result<R::Updated, ClientError> {
        let updated = self.client.update::<R>(id, patch).await.inspect_err(|err| {
            tracing::error!("Error updating {}: {}", R::LABEL, err);
        })?;

        let view = serde_json::to_value(&updated)?;

        let mut state = self.state.write();
        for item in state.items.iter_mut().filter(|item| item.id() == id) {
            *item = merge_view(item, &view)?;
        }

        Ok(updated)
    }

    /// Deletes a record and drops it from the cached list.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.client.delete::<R>(id).await.inspect_err(|err| {
            tracing::error!("Error deleting {}: {}", R::LABEL, err);
        })?;

        self.state.write().items.retain(|item| item.id() != id);

        Ok(())
    }
}

/// Shallow merge: keys in `view` overwrite the same keys of `item`.
fn merge_view<R: Resource>(item: &R, view: &Value) -> Result<R, ClientError> {
    let mut merged = serde_json::to_value(item)?;

    if let (Value::Object(target), Value::Object(source)) = (&mut merged, view) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }

    Ok(serde_json::from_value(merged)?)
}
