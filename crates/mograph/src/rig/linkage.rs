//! Ordered effector list owned by a single cloner.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction for reordering a linked effector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the front of the chain (applied earlier).
    Up,
    /// Towards the back of the chain (applied later).
    Down,
}

/// Names of the effectors linked to one cloner, in application order.
///
/// Each cloner owns its own linkage. Names are unique within a linkage.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Linkage {
    effectors: Vec<String>,
}

impl Linkage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.effectors
    }

    pub fn len(&self) -> usize {
        self.effectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effectors.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.effectors.iter().any(|n| n == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.effectors.iter().position(|n| n == name)
    }

    /// Appends `name` unless already linked. Returns whether it was added.
    pub fn link(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.effectors.push(name);
        true
    }

    /// Removes `name`. Returns whether it was linked.
    pub fn unlink(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(i) => {
                self.effectors.remove(i);
                true
            }
            None => false,
        }
    }

    /// Swaps `name` with its neighbour. Returns `false` if it is not linked or
    /// already at that end of the chain.
    pub fn move_effector(&mut self, name: &str, direction: Direction) -> bool {
        let Some(i) = self.position(name) else {
            return false;
        };
        let j = match direction {
            Direction::Up if i > 0 => i - 1,
            Direction::Down if i + 1 < self.effectors.len() => i + 1,
            _ => return false,
        };
        self.effectors.swap(i, j);
        true
    }

    /// Drops every name for which `exists` is false and returns the dropped
    /// names in their former order.
    pub fn prune(&mut self, mut exists: impl FnMut(&str) -> bool) -> Vec<String> {
        let mut removed = Vec::new();
        self.effectors.retain(|name| {
            let keep = exists(name);
            if !keep {
                removed.push(name.clone());
            }
            keep
        });
        removed
    }

    /// Renames `from` to `to` in place. A stale `to` entry elsewhere in the
    /// chain is dropped so names stay unique.
    pub(crate) fn rename(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        let Some(i) = self.position(from) else {
            return;
        };
        self.effectors[i] = to.to_owned();
        let stale = (0..self.effectors.len()).find(|&k| k != i && self.effectors[k] == to);
        if let Some(j) = stale {
            self.effectors.remove(j);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Linkage {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut linkage = Linkage::new();
        for name in iter {
            linkage.link(name);
        }
        linkage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_is_idempotent() {
        let mut l = Linkage::new();
        assert!(l.link("A"));
        assert!(!l.link("A"));
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn unlink_reports_presence() {
        let mut l: Linkage = ["A", "B"].into_iter().collect();
        assert!(l.unlink("A"));
        assert!(!l.unlink("A"));
        assert_eq!(l.names(), ["B"]);
    }

    #[test]
    fn move_swaps_neighbours_and_stops_at_ends() {
        let mut l: Linkage = ["A", "B", "C"].into_iter().collect();
        assert!(l.move_effector("C", Direction::Up));
        assert_eq!(l.names(), ["A", "C", "B"]);
        assert!(!l.move_effector("A", Direction::Up));
        assert!(!l.move_effector("B", Direction::Down));
        assert!(!l.move_effector("Z", Direction::Down));
    }

    #[test]
    fn prune_keeps_order_of_survivors() {
        let mut l: Linkage = ["A", "B", "C", "D"].into_iter().collect();
        let removed = l.prune(|n| n != "B" && n != "D");
        assert_eq!(removed, vec!["B".to_string(), "D".to_string()]);
        assert_eq!(l.names(), ["A", "C"]);
    }

    #[test]
    fn rename_keeps_slot_and_drops_stale_target() {
        let mut l: Linkage = ["A", "B", "C"].into_iter().collect();
        l.rename("C", "A");
        assert_eq!(l.names(), ["B", "A"]);

        let mut l: Linkage = ["A", "B"].into_iter().collect();
        l.rename("A", "Z");
        assert_eq!(l.names(), ["Z", "B"]);
        l.rename("Missing", "B");
        assert_eq!(l.names(), ["Z", "B"]);
    }

    #[test]
    fn collecting_drops_duplicates() {
        let l: Linkage = ["A", "B", "A"].into_iter().collect();
        assert_eq!(l.names(), ["A", "B"]);
    }
}
