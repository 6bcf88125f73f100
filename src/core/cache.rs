//! Model caching for sharing loaded weights across pipelines.
//!
//! A [`ModelCache`] is an ordinary value: create one at startup and hand it to
//! every builder that should share weights. Nothing here is process-global.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Trait implemented by model option types to generate a stable cache key.
pub trait ModelOptions {
    fn cache_key(&self) -> String;
}

type CacheStorage = HashMap<(TypeId, String), Arc<dyn Any + Send + Sync>>;

/// A thread-safe cache of loaded models.
///
/// Entries are keyed by model type plus a string key, so two model types may
/// reuse the same key without colliding. Cached values are cloned out, which
/// for `Arc`-backed models means sharing the weights.
#[derive(Clone, Default)]
pub struct ModelCache {
    cache: Arc<Mutex<CacheStorage>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a model from the cache, or load it with `loader` and remember it.
    ///
    /// The lock is held across the load so concurrent builders asking for the
    /// same model wait for the first load instead of loading twice.
    pub async fn get_or_load<M, Fut, F>(&self, key: &str, loader: F) -> anyhow::Result<M>
    where
        M: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<M>>,
    {
        let cache_key = (TypeId::of::<M>(), key.to_string());
        let mut cache = self.cache.lock().await;

        if let Some(model) = cache
            .get(&cache_key)
            .and_then(|cached| cached.downcast_ref::<M>())
        {
            tracing::debug!(key, "model cache hit");
            return Ok(model.clone());
        }

        let model = loader().await?;
        cache.insert(cache_key, Arc::new(model.clone()) as Arc<dyn Any + Send + Sync>);
        Ok(model)
    }

    pub async fn clear(&self) {
        self.cache.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.lock().await.is_empty()
    }
}
