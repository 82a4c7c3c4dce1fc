//! # Resolution Cache
//!
//! Tracks, for every [`Selector`], whether the data it needs has been fetched.
//!
//! ```text
//! Unresolved ──begin──▶ Resolving ──finish(ok)──▶ Resolved
//!      ▲                    │
//!      │                    └──finish(err)──▶ Error ──begin──▶ Resolving
//!      └────────invalidate──────────────────────┘
//! ```
//!
//! `begin` only hands out a fetch when the selector is `Unresolved` or `Error`, which
//! is what makes resolution single-flight: while a selector is `Resolving`, later
//! callers park a [`Waiter`] instead of issuing a second request, and every waiter is
//! answered from the same state once the one fetch lands.
//!
//! Every fetch `begin` hands out carries a generation, and completions are settled
//! with it. Invalidating a selector that is still resolving cannot cancel the request,
//! so the entry is flagged stale instead. A `begin` on a stale entry starts a new fetch
//! under a new generation and retires the old one: the old request still answers the
//! waiters parked before the invalidation, while later readers wait for the new one.

use crate::framework::{CollectionState, QueryKey, Resource};
use std::collections::HashMap;

/// What a read needs resolved: one object, or one list query.
///
/// Total counts share the list selector of their query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector<Id> {
    Item(Id),
    List(QueryKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Unresolved,
    Resolving,
    Resolved,
    Error,
}

/// A parked reader. Called with the store state once its selector settles.
pub type Waiter<T> = Box<dyn FnOnce(&CollectionState<T>) + Send>;

/// Identifies one fetch handed out by [`ResolutionCache::begin`].
pub type Generation = u64;

struct Entry<T: Resource> {
    state: ResolutionState,
    stale: bool,
    /// Generation of the fetch the current state refers to.
    generation: Generation,
    /// Newest generation that has settled, `0` if none.
    settled: Generation,
    waiters: Vec<Waiter<T>>,
    /// Superseded fetches still in flight, with the waiters they owe an answer.
    retired: Vec<(Generation, Vec<Waiter<T>>)>,
}

impl<T: Resource> Entry<T> {
    fn new(state: ResolutionState) -> Self {
        Self {
            state,
            stale: false,
            generation: 0,
            settled: 0,
            waiters: Vec::new(),
            retired: Vec::new(),
        }
    }

    /// Forgets the resolution. Returns `true` when nothing refers to the entry anymore.
    fn reset(&mut self) -> bool {
        if self.state == ResolutionState::Resolving {
            self.stale = true;
            return false;
        }
        self.state = ResolutionState::Unresolved;
        self.retired.is_empty()
    }
}

pub struct ResolutionCache<T: Resource> {
    entries: HashMap<Selector<T::Id>, Entry<T>>,
    last_generation: Generation,
}

impl<T: Resource> Default for ResolutionCache<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            last_generation: 0,
        }
    }
}

impl<T: Resource> ResolutionCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, selector: &Selector<T::Id>) -> ResolutionState {
        self.entries
            .get(selector)
            .map(|entry| entry.state)
            .unwrap_or(ResolutionState::Unresolved)
    }

    /// Moves the selector to `Resolving`. Returns the generation to fetch under, or
    /// `None` when the selector is resolved or already has a current fetch in flight.
    pub fn begin(&mut self, selector: &Selector<T::Id>) -> Option<Generation> {
        let entry = self
            .entries
            .entry(selector.clone())
            .or_insert_with(|| Entry::new(ResolutionState::Unresolved));
        match entry.state {
            ResolutionState::Resolved => return None,
            ResolutionState::Resolving if !entry.stale => return None,
            ResolutionState::Resolving => {
                let waiters = std::mem::take(&mut entry.waiters);
                entry.retired.push((entry.generation, waiters));
            }
            ResolutionState::Unresolved | ResolutionState::Error => {}
        }
        self.last_generation += 1;
        entry.generation = self.last_generation;
        entry.state = ResolutionState::Resolving;
        entry.stale = false;
        Some(self.last_generation)
    }

    /// Parks a waiter on a resolving selector. Returns it back if the selector is not resolving.
    pub fn wait(&mut self, selector: &Selector<T::Id>, waiter: Waiter<T>) -> Result<(), Waiter<T>> {
        match self.entries.get_mut(selector) {
            Some(entry) if entry.state == ResolutionState::Resolving => {
                entry.waiters.push(waiter);
                Ok(())
            }
            _ => Err(waiter),
        }
    }

    /// `true` when a fetch newer than `generation` has already settled, so its
    /// result must not overwrite the newer one.
    pub fn is_outdated(&self, selector: &Selector<T::Id>, generation: Generation) -> bool {
        self.entries
            .get(selector)
            .is_some_and(|entry| entry.settled > generation)
    }

    /// Settles the fetch `generation` of a selector and returns the waiters to answer.
    pub fn finish(
        &mut self,
        selector: &Selector<T::Id>,
        generation: Generation,
        succeeded: bool,
    ) -> Vec<Waiter<T>> {
        let Some(entry) = self.entries.get_mut(selector) else {
            return Vec::new();
        };

        let waiters = if entry.generation == generation && entry.state == ResolutionState::Resolving {
            entry.settled = entry.settled.max(generation);
            let waiters = std::mem::take(&mut entry.waiters);
            if entry.stale {
                entry.stale = false;
                entry.state = ResolutionState::Unresolved;
            } else {
                entry.state = if succeeded {
                    ResolutionState::Resolved
                } else {
                    ResolutionState::Error
                };
            }
            waiters
        } else {
            match entry.retired.iter().position(|(g, _)| *g == generation) {
                Some(index) => entry.retired.remove(index).1,
                None => Vec::new(),
            }
        };

        if entry.state == ResolutionState::Unresolved && entry.retired.is_empty() {
            self.entries.remove(selector);
        }
        waiters
    }

    /// Marks a selector resolved without a fetch (e.g. after a create or delete).
    pub fn mark_resolved(&mut self, selector: Selector<T::Id>) {
        let entry = self
            .entries
            .entry(selector)
            .or_insert_with(|| Entry::new(ResolutionState::Resolved));
        if entry.state != ResolutionState::Resolving {
            entry.state = ResolutionState::Resolved;
        }
    }

    pub fn invalidate(&mut self, selector: &Selector<T::Id>) {
        let unused = self.entries.get_mut(selector).is_some_and(Entry::reset);
        if unused {
            self.entries.remove(selector);
        }
    }

    pub fn invalidate_lists(&mut self) {
        self.invalidate_where(|selector| matches!(selector, Selector::List(_)));
    }

    pub fn invalidate_all(&mut self) {
        self.invalidate_where(|_| true);
    }

    fn invalidate_where(&mut self, predicate: impl Fn(&Selector<T::Id>) -> bool) {
        self.entries
            .retain(|selector, entry| !predicate(selector) || !entry.reset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::DynamicResource;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    type Cache = ResolutionCache<DynamicResource>;

    fn item(id: &str) -> Selector<String> {
        Selector::Item(id.to_string())
    }

    #[test]
    fn test_begin_is_single_flight() {
        let mut cache = Cache::new();
        assert!(cache.begin(&item("1")).is_some());
        assert!(cache.begin(&item("1")).is_none());
        assert_eq!(cache.state(&item("1")), ResolutionState::Resolving);
    }

    #[test]
    fn test_error_allows_new_attempt() {
        let mut cache = Cache::new();
        let generation = cache.begin(&item("1")).unwrap();
        cache.finish(&item("1"), generation, false);
        assert_eq!(cache.state(&item("1")), ResolutionState::Error);
        assert!(cache.begin(&item("1")).is_some());
    }

    #[test]
    fn test_waiters_are_returned_on_finish() {
        let mut cache = Cache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let generation = cache.begin(&item("1")).unwrap();
        for _ in 0..3 {
            let calls = calls.clone();
            let waiter: Waiter<DynamicResource> = Box::new(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            });
            assert!(cache.wait(&item("1"), waiter).is_ok());
        }
        let state = CollectionState::new();
        for waiter in cache.finish(&item("1"), generation, true) {
            waiter(&state);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.state(&item("1")), ResolutionState::Resolved);
    }

    #[test]
    fn test_wait_rejects_settled_selector() {
        let mut cache = Cache::new();
        let waiter: Waiter<DynamicResource> = Box::new(|_| {});
        assert!(cache.wait(&item("1"), waiter).is_err());
    }

    #[test]
    fn test_invalidate_while_resolving_drops_after_finish() {
        let mut cache = Cache::new();
        let list = Selector::List(QueryKey::default());
        let generation = cache.begin(&list).unwrap();
        cache.invalidate_lists();
        assert_eq!(cache.state(&list), ResolutionState::Resolving);
        cache.finish(&list, generation, true);
        assert_eq!(cache.state(&list), ResolutionState::Unresolved);
    }

    fn counting(calls: &Arc<AtomicUsize>) -> Waiter<DynamicResource> {
        let calls = calls.clone();
        Box::new(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_begin_on_stale_selector_starts_new_fetch() {
        let mut cache = Cache::new();
        let list = Selector::List(QueryKey::default());
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));

        let old = cache.begin(&list).unwrap();
        assert!(cache.wait(&list, counting(&before)).is_ok());
        cache.invalidate_lists();

        let new = cache.begin(&list).unwrap();
        assert!(new > old);
        assert!(cache.wait(&list, counting(&after)).is_ok());
        assert!(cache.begin(&list).is_none());

        // The old request only answers the readers that were parked on it.
        let state = CollectionState::new();
        for waiter in cache.finish(&list, old, true) {
            waiter(&state);
        }
        assert_eq!(before.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 0);
        assert_eq!(cache.state(&list), ResolutionState::Resolving);

        for waiter in cache.finish(&list, new, true) {
            waiter(&state);
        }
        assert_eq!(after.load(Ordering::SeqCst), 1);
        assert_eq!(cache.state(&list), ResolutionState::Resolved);
    }

    #[test]
    fn test_retired_fetch_landing_last_is_outdated() {
        let mut cache = Cache::new();
        let list = Selector::List(QueryKey::default());
        let old = cache.begin(&list).unwrap();
        cache.invalidate(&list);
        let new = cache.begin(&list).unwrap();

        assert!(!cache.is_outdated(&list, old));
        cache.finish(&list, new, true);
        assert!(cache.is_outdated(&list, old));
        assert!(!cache.is_outdated(&list, new));

        assert!(cache.finish(&list, old, true).is_empty());
        assert_eq!(cache.state(&list), ResolutionState::Resolved);
    }

    #[test]
    fn test_invalidate_lists_keeps_items() {
        let mut cache = Cache::new();
        let list = Selector::List(QueryKey::default());
        cache.mark_resolved(list.clone());
        cache.mark_resolved(item("1"));
        cache.invalidate_lists();
        assert_eq!(cache.state(&list), ResolutionState::Unresolved);
        assert_eq!(cache.state(&item("1")), ResolutionState::Resolved);
        cache.invalidate_all();
        assert_eq!(cache.state(&item("1")), ResolutionState::Unresolved);
    }
}
