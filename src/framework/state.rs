//! # Collection State
//!
//! [`CollectionState`] is the normalized mirror of one REST collection. It is owned
//! by exactly one [`ResourceStore`](crate::framework::ResourceStore) task, so the
//! transitions below are applied one at a time and need no synchronization.
//!
//! Normalization: each object lives once in `data`, keyed by id. A list query only
//! stores the ordered ids it returned; reading the list goes through `data`, so an
//! update to one object is visible in every list that references it.

use crate::framework::{QueryKey, RequestError, Resource};
use std::collections::HashMap;

/// Key under which a request error is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKey<Id> {
    Item(Id),
    List(QueryKey),
    Create,
    Update(Id),
    Delete(Id),
}

#[derive(Debug, Clone)]
pub struct CollectionState<T: Resource> {
    items: HashMap<QueryKey, Vec<T::Id>>,
    items_count: HashMap<QueryKey, usize>,
    errors: HashMap<ErrorKey<T::Id>, RequestError>,
    data: HashMap<T::Id, T>,
}

impl<T: Resource> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            items_count: HashMap::new(),
            errors: HashMap::new(),
            data: HashMap::new(),
        }
    }
}

impl<T: Resource> CollectionState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Reads ---

    pub fn item(&self, id: &T::Id) -> Option<&T> {
        self.data.get(id)
    }

    /// Objects of a cached list, in server order. Ids without data are skipped.
    pub fn list(&self, key: &QueryKey) -> Option<Vec<T>> {
        self.items.get(key).map(|ids| {
            ids.iter()
                .filter_map(|id| self.data.get(id).cloned())
                .collect()
        })
    }

    pub fn list_ids(&self, key: &QueryKey) -> Option<&[T::Id]> {
        self.items.get(key).map(Vec::as_slice)
    }

    pub fn total_count(&self, key: &QueryKey) -> Option<usize> {
        self.items_count.get(key).copied()
    }

    pub fn error(&self, key: &ErrorKey<T::Id>) -> Option<&RequestError> {
        self.errors.get(key)
    }

    pub fn data(&self) -> &HashMap<T::Id, T> {
        &self.data
    }

    pub fn items(&self) -> &HashMap<QueryKey, Vec<T::Id>> {
        &self.items
    }

    pub fn errors(&self) -> &HashMap<ErrorKey<T::Id>, RequestError> {
        &self.errors
    }

    // --- Transitions ---

    /// Merges one received object into `data`.
    pub fn receive_item(&mut self, item: T) -> T::Id {
        let id = item.id();
        match self.data.get_mut(&id) {
            Some(existing) => existing.merge(item),
            None => {
                self.data.insert(id.clone(), item);
            }
        }
        id
    }

    /// Stores a list result. `total` falls back to the page length.
    pub fn receive_list(&mut self, key: QueryKey, items: Vec<T>, total: Option<usize>) {
        let count = total.unwrap_or(items.len());
        let ids: Vec<T::Id> = items.into_iter().map(|item| self.receive_item(item)).collect();
        self.items.insert(key.clone(), ids);
        self.items_count.insert(key, count);
    }

    pub fn record_error(&mut self, key: ErrorKey<T::Id>, error: RequestError) {
        self.errors.insert(key, error);
    }

    pub fn clear_error(&mut self, key: &ErrorKey<T::Id>) {
        self.errors.remove(key);
    }

    /// Drops an object from `data` and from every list that contained it.
    pub fn remove_item(&mut self, id: &T::Id) {
        self.data.remove(id);
        for (key, ids) in self.items.iter_mut() {
            let before = ids.len();
            ids.retain(|candidate| candidate != id);
            let removed = before - ids.len();
            if removed > 0 {
                if let Some(count) = self.items_count.get_mut(key) {
                    *count = count.saturating_sub(removed);
                }
            }
        }
    }
}
