//! Ephemeral Instance Store
//!
//! Holds the payload behind every minted custom id until it expires or is
//! dropped. Each entry owns the abort handle of its eviction task, so a
//! manual drop or a re-put cancels the pending timer.
//!
//! Entries past `expires_at` are treated as absent even if their eviction
//! task has not run yet. This also covers stores used outside a tokio
//! runtime, where no eviction task can be scheduled.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use shared_types::UserId;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::template::TemplateRef;

/// Upper bound on an instance TTL. Longer values are clamped so the expiry
/// instant never overflows.
pub const MAX_INSTANCE_TTL: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// Type-erased instance payload.
pub type Payload = Arc<dyn Any + Send + Sync>;

struct InstanceEntry {
    template: TemplateRef,
    payload: Payload,
    owner: Option<UserId>,
    expires_at: Instant,
    eviction: Option<AbortHandle>,
    /// Distinguishes this entry from a later put under the same id.
    generation: u64,
}

impl InstanceEntry {
    fn cancel_eviction(&self) {
        if let Some(handle) = &self.eviction {
            handle.abort();
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// A live instance as seen by dispatch.
#[derive(Clone)]
pub struct InstanceSnapshot {
    pub template: TemplateRef,
    pub payload: Payload,
    pub owner: Option<UserId>,
    pub expires_at: Instant,
}

impl fmt::Debug for InstanceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceSnapshot")
            .field("template", &self.template)
            .field("owner", &self.owner)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Counters for store activity.
#[derive(Debug, Default)]
struct Counters {
    inserted: AtomicU64,
    dropped: AtomicU64,
    evicted: AtomicU64,
}

/// Point-in-time copy of the store counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Instances put.
    pub inserted: u64,
    /// Instances removed by an explicit drop.
    pub dropped: u64,
    /// Instances removed because their TTL elapsed.
    pub evicted: u64,
    /// Entries currently held, including expired ones not yet swept.
    pub live: usize,
}

/// In-memory instance store with per-entry TTL.
#[derive(Default)]
pub struct InstanceStore {
    entries: DashMap<String, InstanceEntry>,
    next_generation: AtomicU64,
    counters: Counters,
}

impl InstanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an instance and schedule its eviction.
    ///
    /// Replacing an id cancels the eviction task of the previous entry. The
    /// entry is in the map before its timer exists, and the timer handle is
    /// attached while the shard is still locked, so an early-firing timer
    /// always finds the entry it was scheduled for. TTLs are clamped to
    /// `MAX_INSTANCE_TTL`.
    pub fn put(
        self: &Arc<Self>,
        instance_id: impl Into<String>,
        template: TemplateRef,
        payload: Payload,
        owner: Option<UserId>,
        ttl: Duration,
    ) {
        let instance_id = instance_id.into();
        let ttl = ttl.min(MAX_INSTANCE_TTL);
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        let entry = InstanceEntry {
            template,
            payload,
            owner,
            expires_at: Instant::now() + ttl,
            eviction: None,
            generation,
        };

        let mut slot = match self.entries.entry(instance_id.clone()) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(entry).cancel_eviction();
                debug!(instance_id = %instance_id, "Replaced instance");
                occupied.into_ref()
            }
            Entry::Vacant(vacant) => vacant.insert(entry),
        };
        slot.eviction = self.schedule_eviction(&instance_id, generation, ttl);
        drop(slot);

        self.counters.inserted.fetch_add(1, Ordering::Relaxed);
        debug!(instance_id = %instance_id, ttl = ?ttl, "Stored instance");
    }

    /// Fetch a live instance. Expired entries are removed and reported absent.
    pub fn get(&self, instance_id: &str) -> Option<InstanceSnapshot> {
        let now = Instant::now();
        {
            let entry = self.entries.get(instance_id)?;
            if !entry.is_expired(now) {
                return Some(InstanceSnapshot {
                    template: entry.template.clone(),
                    payload: entry.payload.clone(),
                    owner: entry.owner.clone(),
                    expires_at: entry.expires_at,
                });
            }
        }

        if let Some((_, entry)) = self
            .entries
            .remove_if(instance_id, |_, entry| entry.is_expired(now))
        {
            entry.cancel_eviction();
            self.counters.evicted.fetch_add(1, Ordering::Relaxed);
            debug!(instance_id, "Expired instance removed on access");
        }
        None
    }

    /// Remove an instance now. Returns `false` if it was already gone.
    pub fn drop_instance(&self, instance_id: &str) -> bool {
        match self.entries.remove(instance_id) {
            Some((_, entry)) => {
                entry.cancel_eviction();
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                debug!(instance_id, "Dropped instance");
                true
            }
            None => false,
        }
    }

    /// Sweep every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut purged = 0;

        self.entries.retain(|_, entry| {
            if entry.is_expired(now) {
                entry.cancel_eviction();
                purged += 1;
                false
            } else {
                true
            }
        });

        if purged > 0 {
            self.counters
                .evicted
                .fetch_add(purged as u64, Ordering::Relaxed);
            debug!(purged, "Purged expired instances");
        }
        purged
    }

    pub fn contains(&self, instance_id: &str) -> bool {
        self.get(instance_id).is_some()
    }

    /// Entries held, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            inserted: self.counters.inserted.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
            evicted: self.counters.evicted.load(Ordering::Relaxed),
            live: self.entries.len(),
        }
    }

    fn schedule_eviction(
        self: &Arc<Self>,
        instance_id: &str,
        generation: u64,
        ttl: Duration,
    ) -> Option<AbortHandle> {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!(
                    instance_id,
                    "No tokio runtime; instance will expire lazily on access"
                );
                return None;
            }
        };

        let store: Weak<Self> = Arc::downgrade(self);
        let instance_id = instance_id.to_string();
        let task = runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(store) = store.upgrade() {
                store.evict(&instance_id, generation);
            }
        });
        Some(task.abort_handle())
    }

    /// Remove the entry only if it is still the generation the timer was set for.
    fn evict(&self, instance_id: &str, generation: u64) {
        if self
            .entries
            .remove_if(instance_id, |_, entry| entry.generation == generation)
            .is_some()
        {
            self.counters.evicted.fetch_add(1, Ordering::Relaxed);
            debug!(instance_id, "Evicted instance after TTL");
        }
    }
}

/// Removes one specific instance on demand. Handed to handlers so they can
/// retire the element they were invoked from.
#[derive(Clone)]
pub struct InstanceDropper {
    store: Arc<InstanceStore>,
    instance_id: String,
}

impl InstanceDropper {
    pub fn new(store: Arc<InstanceStore>, instance_id: impl Into<String>) -> Self {
        Self {
            store,
            instance_id: instance_id.into(),
        }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Remove the instance. Idempotent; returns whether this call removed it.
    pub fn drop_instance(&self) -> bool {
        self.store.drop_instance(&self.instance_id)
    }
}

impl fmt::Debug for InstanceDropper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceDropper")
            .field("instance_id", &self.instance_id)
            .finish()
    }
}
