//! Rebuild cycle and timed refresh loop

use super::handle::SchemaHandle;
use super::types::Generation;
use crate::document::DocumentProvider;
use crate::error::Result;
use crate::schema::SchemaAssembler;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, info_span, warn, Instrument};

/// Rebuilds schemas from a provider and publishes them
pub struct SchemaService {
    provider: Arc<dyn DocumentProvider>,
    assembler: SchemaAssembler,
    handle: SchemaHandle,
    next_number: AtomicU64,
    /// Serializes rebuilds so generations publish in number order
    rebuild_lock: Mutex<()>,
}

impl SchemaService {
    pub fn new(provider: Arc<dyn DocumentProvider>, assembler: SchemaAssembler) -> Self {
        Self {
            provider,
            assembler,
            handle: SchemaHandle::new(),
            next_number: AtomicU64::new(1),
            rebuild_lock: Mutex::new(()),
        }
    }

    /// Handle readers use to reach the published generation
    pub fn handle(&self) -> SchemaHandle {
        self.handle.clone()
    }

    pub fn assembler(&self) -> &SchemaAssembler {
        &self.assembler
    }

    /// Run one rebuild cycle: fetch, build, publish.
    ///
    /// On any failure nothing is published and the previous generation stays
    /// live.
    pub async fn rebuild(&self) -> Result<Arc<Generation>> {
        let _guard = self.rebuild_lock.lock().await;
        let number = self.next_number.load(Ordering::SeqCst);

        async {
            let fetched = self.provider.fetch().await?;
            let schema = self.assembler.assemble(&fetched.value)?;

            let generation = Arc::new(Generation {
                number,
                schema,
                document: fetched.value,
                raw: fetched.raw,
                built_at: Utc::now(),
            });

            self.handle.publish(Arc::clone(&generation)).await;
            self.next_number.store(number + 1, Ordering::SeqCst);

            let summary = generation.summary();
            info!(
                "Published generation {}: {} root fields, {} types, {} bytes",
                summary.number, summary.root_fields, summary.types, summary.document_bytes
            );

            Ok(generation)
        }
        .instrument(info_span!("rebuild", generation = number, source = %self.provider.describe()))
        .await
    }

    /// Rebuild now and then once per `interval` until the returned task is
    /// stopped. Failed cycles are logged and retried on the next tick.
    pub fn spawn(self: Arc<Self>, interval: Duration) -> RefreshTask {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.rebuild().await {
                            if e.is_retryable() {
                                warn!("Schema rebuild failed, keeping previous generation: {e}");
                            } else {
                                error!("Schema rebuild failed, keeping previous generation: {e}");
                            }
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            info!("Stopping schema refresh");
                            break;
                        }
                    }
                }
            }
        });

        RefreshTask { shutdown_tx, join }
    }
}

/// Running refresh loop
pub struct RefreshTask {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl RefreshTask {
    /// Signal the loop to stop and wait for it. An in-flight rebuild
    /// finishes first.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.join.await;
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}
