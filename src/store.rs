//! Storage capability handed to resource actors.
//!
//! Actors never touch a global collection: they own a `Box<dyn Store<T>>`
//! and pipelines receive it by reference, so every test can start from a
//! fresh store.

use crate::actor_framework::Entity;

pub trait Store<T: Entity>: Send {
    /// Snapshot of the whole collection in insertion order.
    fn list(&self) -> Vec<T>;
    fn find(&self, id: &str) -> Option<T>;
    fn insert(&mut self, item: T);
    /// Overwrite the stored entity with the same id. Returns false if absent.
    fn replace(&mut self, item: T) -> bool;
    fn remove(&mut self, id: &str) -> Option<T>;
}

/// Vector-backed store. Lookups are linear, matching the size of the data
/// this service is meant for.
#[derive(Debug, Clone)]
pub struct MemoryStore<T> {
    items: Vec<T>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Store<T> for MemoryStore<T> {
    fn list(&self) -> Vec<T> {
        self.items.clone()
    }

    fn find(&self, id: &str) -> Option<T> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    fn replace(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dish;

    fn dish(id: &str, name: &str) -> Dish {
        Dish::new(id, name, "desc", 3, "http://img")
    }

    #[test]
    fn keeps_insertion_order() {
        let mut store = MemoryStore::new();
        store.insert(dish("b", "Burrito"));
        store.insert(dish("a", "Arepa"));

        let ids: Vec<String> = store.list().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn replace_overwrites_in_place() {
        let mut store = MemoryStore::with_items(vec![dish("a", "Arepa"), dish("b", "Burrito")]);

        assert!(store.replace(dish("a", "Arroz")));
        assert!(!store.replace(dish("zzz", "Nope")));

        let list = store.list();
        assert_eq!(list[0].name, "Arroz");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_returns_the_removed_item() {
        let mut store = MemoryStore::with_items(vec![dish("a", "Arepa")]);

        assert_eq!(store.remove("a").map(|d| d.name), Some("Arepa".to_string()));
        assert!(store.remove("a").is_none());
        assert!(store.find("a").is_none());
    }
}
