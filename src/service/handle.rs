//! Published-generation handle
//!
//! Single writer (the rebuild cycle), any number of readers. Publishing
//! replaces one `Arc` under a write lock held only for the swap. Readers take
//! the read lock only long enough to clone the `Arc`; resolution then runs
//! against the cloned generation with no lock held, so a held generation
//! never delays a publish.

use super::types::Generation;
use crate::error::{Error, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared reference to the currently published generation
#[derive(Debug, Clone, Default)]
pub struct SchemaHandle {
    current: Arc<RwLock<Option<Arc<Generation>>>>,
}

impl SchemaHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published generation, returning the previous one
    pub async fn publish(&self, generation: Arc<Generation>) -> Option<Arc<Generation>> {
        let mut current = self.current.write().await;
        current.replace(generation)
    }

    /// Currently published generation, if any
    pub async fn current(&self) -> Option<Arc<Generation>> {
        self.current.read().await.clone()
    }

    /// Currently published generation, or `NotPublished`
    pub async fn require(&self) -> Result<Arc<Generation>> {
        self.current().await.ok_or(Error::NotPublished)
    }

    /// Number of the published generation, 0 when nothing is published
    pub async fn generation_number(&self) -> u64 {
        self.current
            .read()
            .await
            .as_ref()
            .map_or(0, |generation| generation.number)
    }
}
