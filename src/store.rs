//! In-memory checklist state.
//!
//! A `Store` is loaded fresh for every command, mutated in memory, and handed
//! back to [`crate::storage::Storage::save`]. It owns the id counter, so
//! nothing about id assignment lives outside the value itself.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::id;
use crate::item::Item;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    items: BTreeMap<u64, Item>,
    counter: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from persisted parts.
    ///
    /// The counter is raised past the largest stored id if needed, so a lost
    /// or stale counter file can never hand out an id that is still in use.
    /// An item stored under `u64::MAX` leaves the counter at `u64::MAX`, where
    /// [`Store::add`] refuses to assign.
    pub fn from_parts(items: BTreeMap<u64, Item>, counter: u64) -> Self {
        let floor = match items.keys().next_back() {
            Some(max) => max.checked_add(1).unwrap_or(u64::MAX),
            None => 0,
        };
        Self {
            items,
            counter: counter.max(floor),
        }
    }

    pub fn items(&self) -> &BTreeMap<u64, Item> {
        &self.items
    }

    /// Next id `add` will assign.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Decode a user-facing id and return it only if an item exists under it.
    pub fn resolve(&self, raw: &str) -> Option<u64> {
        id::decode(raw).filter(|id| self.items.contains_key(id))
    }

    /// Insert a new unchecked item under the current counter and advance it.
    ///
    /// `u64::MAX` is never assigned: the counter must stay above every id, so
    /// once it reaches `u64::MAX` the store is full.
    pub fn add(&mut self, title: impl Into<String>) -> Result<u64> {
        if self.counter == u64::MAX {
            return Err(Error::IdsExhausted(self.counter));
        }
        let id = self.counter;
        self.items.insert(id, Item::new(title));
        self.counter = id + 1;
        Ok(id)
    }

    /// Set an item's status. Returns true only when the status changed.
    pub fn set_status(&mut self, id: u64, status: bool) -> bool {
        match self.items.get_mut(&id) {
            Some(item) if item.status != status => {
                item.status = status;
                true
            }
            _ => false,
        }
    }

    /// Toggle each tag in order against the item's current tags.
    ///
    /// Returns false when the item does not exist.
    pub fn toggle_tags<S: AsRef<str>>(&mut self, id: u64, tags: &[S]) -> bool {
        let Some(item) = self.items.get_mut(&id) else {
            return false;
        };
        for tag in tags {
            item.toggle_tag(tag.as_ref());
        }
        true
    }

    /// Replace an item's title. Returns false when the item does not exist.
    pub fn rename(&mut self, id: u64, title: impl Into<String>) -> bool {
        match self.items.get_mut(&id) {
            Some(item) => {
                item.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Items selected by `filter`, in ascending id order.
    pub fn select<'a>(&'a self, filter: &'a Filter) -> impl Iterator<Item = (u64, &'a Item)> + 'a {
        self.items
            .iter()
            .filter(move |(_, item)| filter.matches(item))
            .map(|(id, item)| (*id, item))
    }

    pub fn remove(&mut self, id: u64) -> Option<Item> {
        self.items.remove(&id)
    }

    /// Delete every item selected by `filter`; returns the removed ids.
    ///
    /// The counter is left alone, so `Filter::All` empties the store without
    /// rewinding id assignment.
    pub fn remove_matching(&mut self, filter: &Filter) -> Vec<u64> {
        let mut removed = Vec::new();
        self.items.retain(|id, item| {
            if filter.matches(item) {
                removed.push(*id);
                false
            } else {
                true
            }
        });
        removed
    }
}
