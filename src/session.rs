//! Transient storage of the last optimized route per courier.
//!
//! The store is a cache, not a record: every successful optimization
//! overwrites the slot and earlier routes are gone. Writers for the same
//! courier are not serialized here; the last `store` wins, so callers must
//! keep at most one optimization in flight per courier.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Deserialize;
use tracing::debug;

use crate::error::RouteNotFound;
use crate::polyline::Polyline;
use crate::route::Route;
use crate::traits::{Clock, SystemClock};

/// How session slots are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKeying {
    /// One slot per courier: optimizing another date replaces the previous
    /// route, and fetching the replaced date finds nothing.
    #[default]
    PerCourier,
    /// One slot per (courier, date); routes for different dates coexist.
    PerCourierAndDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub keying: SessionKeying,
    /// Entries older than this many seconds read as missing.
    pub ttl_secs: Option<i64>,
}

/// A stored route with the date it targets.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEntry<Id> {
    /// Target date (unix timestamp, date only).
    pub date: i64,
    pub route: Route<Id>,
    pub geometry: Option<Polyline>,
    /// Unix seconds at store time.
    pub stored_at: i64,
}

type SlotKey<C> = (C, Option<i64>);

pub struct RouteSessionStore<C, Id, K = SystemClock> {
    config: SessionConfig,
    clock: K,
    slots: Mutex<HashMap<SlotKey<C>, SessionEntry<Id>>>,
}

impl<C, Id> RouteSessionStore<C, Id, SystemClock>
where
    C: Clone + Eq + Hash,
    Id: Clone,
{
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C, Id> Default for RouteSessionStore<C, Id, SystemClock>
where
    C: Clone + Eq + Hash,
    Id: Clone,
{
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<C, Id, K> RouteSessionStore<C, Id, K>
where
    C: Clone + Eq + Hash,
    Id: Clone,
    K: Clock,
{
    pub fn with_clock(config: SessionConfig, clock: K) -> Self {
        Self {
            config,
            clock,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Overwrites the courier's slot unconditionally.
    pub fn store(&self, courier: &C, date: i64, route: Route<Id>, geometry: Option<Polyline>) {
        let entry = SessionEntry {
            date,
            route,
            geometry,
            stored_at: self.clock.now_unix(),
        };
        let replaced = self.slots().insert(self.key(courier, date), entry);
        if let Some(previous) = replaced {
            debug!(
                previous_date = previous.date,
                date, "session route overwritten"
            );
        }
    }

    /// The route stored for `courier` targeting `date`.
    pub fn fetch(&self, courier: &C, date: i64) -> Result<SessionEntry<Id>, RouteNotFound> {
        let slots = self.slots();
        let entry = slots.get(&self.key(courier, date)).ok_or(RouteNotFound)?;
        if entry.date != date || self.is_stale(entry) {
            return Err(RouteNotFound);
        }
        Ok(entry.clone())
    }

    /// Drops the slot that `fetch(courier, date)` would read.
    /// Returns whether an entry for that date was removed.
    pub fn invalidate(&self, courier: &C, date: i64) -> bool {
        let mut slots = self.slots();
        let key = self.key(courier, date);
        match slots.get(&key) {
            Some(entry) if entry.date == date => slots.remove(&key).is_some(),
            _ => false,
        }
    }

    /// Drops every slot held for `courier`.
    pub fn clear_courier(&self, courier: &C) {
        self.slots().retain(|(owner, _), _| owner != courier);
    }

    pub fn len(&self) -> usize {
        self.slots().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }

    fn key(&self, courier: &C, date: i64) -> SlotKey<C> {
        match self.config.keying {
            SessionKeying::PerCourier => (courier.clone(), None),
            SessionKeying::PerCourierAndDate => (courier.clone(), Some(date)),
        }
    }

    fn is_stale(&self, entry: &SessionEntry<Id>) -> bool {
        self.config
            .ttl_secs
            .is_some_and(|ttl| self.clock.now_unix() - entry.stored_at > ttl)
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<SlotKey<C>, SessionEntry<Id>>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
