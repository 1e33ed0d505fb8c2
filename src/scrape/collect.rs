// src/scrape/collect.rs
use std::collections::HashSet;

/// Run-wide image id set. Keeps first-seen order; duplicates across
/// categories (and pages) are dropped on insert.
#[derive(Debug, Default)]
pub struct ImageSet {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many of `ids` were new.
    pub fn extend_from(&mut self, ids: &[String]) -> usize {
        let before = self.order.len();
        for id in ids {
            if self.seen.insert(id.clone()) {
                self.order.push(id.clone());
            }
        }
        self.order.len() - before
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}
