//! Insertion-ordered, deduplicating label accumulator.

use std::collections::HashSet;

/// Labels in first-seen order, each at most once.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl LabelSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `label` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, label: &str) -> bool {
        if self.seen.contains(label) {
            return false;
        }
        self.seen.insert(label.to_string());
        self.order.push(label.to_string());
        true
    }

    /// Remove `label`, keeping the relative order of the rest.
    pub fn remove(&mut self, label: &str) -> bool {
        if !self.seen.remove(label) {
            return false;
        }
        self.order.retain(|l| l != label);
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.seen.contains(label)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_seen_order() {
        let mut set = LabelSet::new();
        assert!(set.insert("c++"));
        assert!(set.insert("fs"));
        assert!(!set.insert("c++"));
        assert!(set.insert("buffer"));

        assert_eq!(set.into_vec(), vec!["c++", "fs", "buffer"]);
    }

    #[test]
    fn test_remove_then_reinsert_moves_to_end() {
        let mut set = LabelSet::new();
        set.insert("fs");
        set.insert("net");
        assert!(set.remove("fs"));
        assert!(!set.remove("fs"));
        set.insert("fs");

        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["net", "fs"]);
        assert_eq!(set.len(), 2);
    }
}
