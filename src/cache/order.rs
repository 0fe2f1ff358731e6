//! Insertion Order Module
//!
//! Tracks the order in which keys were first inserted so that size-bound
//! eviction can pick the oldest candidate.

use std::borrow::Borrow;
use std::collections::vec_deque;
use std::collections::VecDeque;
use std::iter::Rev;

// == Insertion Order ==
/// Remembers key insertion order.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently inserted
/// - Back = Oldest insertion
///
/// Re-inserting a key that is already tracked keeps its original position.
#[derive(Debug)]
pub struct InsertionOrder<K> {
    order: VecDeque<K>,
}

impl<K> Default for InsertionOrder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> InsertionOrder<K> {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // == Oldest ==
    /// Returns the oldest tracked key without removing it.
    pub fn oldest(&self) -> Option<&K> {
        self.order.back()
    }

    // == Iterate ==
    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> Rev<vec_deque::Iter<'_, K>> {
        self.order.iter().rev()
    }

    // == Clear ==
    /// Forgets every key, returning them oldest first.
    pub fn drain(&mut self) -> Vec<K> {
        self.order.drain(..).rev().collect()
    }
}

impl<K: Eq> InsertionOrder<K> {
    // == Insert ==
    /// Records a key as newest unless it is already tracked.
    pub fn insert(&mut self, key: K) {
        if !self.contains(&key) {
            self.order.push_front(key);
        }
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        if let Some(index) = self.order.iter().position(|k| k.borrow() == key) {
            self.order.remove(index);
        }
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.order.iter().any(|k| k.borrow() == key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn keys(order: &InsertionOrder<String>) -> Vec<&str> {
        order.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_order_new() {
        let order: InsertionOrder<String> = InsertionOrder::new();
        assert!(order.is_empty());
        assert_eq!(order.len(), 0);
        assert!(order.oldest().is_none());
    }

    #[test]
    fn test_insert_keeps_first_position() {
        let mut order = InsertionOrder::new();

        order.insert("a".to_string());
        order.insert("b".to_string());
        order.insert("c".to_string());
        order.insert("a".to_string());

        assert_eq!(order.len(), 3);
        assert_eq!(keys(&order), vec!["a", "b", "c"]);
        assert_eq!(order.oldest().map(String::as_str), Some("a"));
    }

    #[test]
    fn test_remove() {
        let mut order = InsertionOrder::new();

        order.insert("key1".to_string());
        order.insert("key2".to_string());
        order.insert("key3".to_string());

        order.remove("key2");

        assert_eq!(order.len(), 2);
        assert!(!order.contains("key2"));
        assert_eq!(keys(&order), vec!["key1", "key3"]);
    }

    #[test]
    fn test_remove_nonexistent_key() {
        let mut order = InsertionOrder::new();

        order.insert("key1".to_string());
        order.remove("nonexistent");

        assert_eq!(order.len(), 1);
        assert!(order.contains("key1"));
    }

    #[test]
    fn test_reinsert_after_remove_becomes_newest() {
        let mut order = InsertionOrder::new();

        order.insert("a".to_string());
        order.insert("b".to_string());
        order.remove("a");
        order.insert("a".to_string());

        assert_eq!(keys(&order), vec!["b", "a"]);
    }

    #[test]
    fn test_drain_returns_oldest_first() {
        let mut order = InsertionOrder::new();

        order.insert(1);
        order.insert(2);
        order.insert(3);

        assert_eq!(order.drain(), vec![1, 2, 3]);
        assert!(order.is_empty());
    }
}
