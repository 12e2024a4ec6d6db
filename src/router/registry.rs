//! Registry of per-caller sinks keyed by thread identity

use super::{caller_sink::CallerSink, identity::CallerIdentity};
use crate::core::HostSink;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::ThreadId;

/// Lazily populated map from caller thread to its [`CallerSink`].
///
/// Lookups take the read lock; a miss upgrades to the write lock and inserts through the
/// entry API, so check-then-insert is atomic and each identity gets at most one sink.
/// Entries are never removed.
#[derive(Default)]
pub struct CallerRegistry {
    sinks: RwLock<HashMap<ThreadId, Arc<CallerSink>>>,
    created: AtomicU64,
}

impl CallerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink for `caller`, creating it on first use.
    ///
    /// Returns the sink and whether this call created it.
    pub fn sink_for(
        &self,
        caller: &CallerIdentity,
        parent: &Arc<dyn HostSink>,
    ) -> (Arc<CallerSink>, bool) {
        if let Some(sink) = self.sinks.read().get(&caller.id()) {
            return (Arc::clone(sink), false);
        }

        let mut sinks = self.sinks.write();
        let mut created = false;
        let sink = sinks.entry(caller.id()).or_insert_with(|| {
            created = true;
            Arc::new(CallerSink::new(caller, Arc::clone(parent)))
        });
        if created {
            self.created.fetch_add(1, Ordering::Relaxed);
        }
        (Arc::clone(sink), created)
    }

    pub fn contains(&self, caller: &CallerIdentity) -> bool {
        self.sinks.read().contains_key(&caller.id())
    }

    pub fn len(&self) -> usize {
        self.sinks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.read().is_empty()
    }

    /// Total sinks ever constructed by this registry
    pub fn created_count(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }
}
