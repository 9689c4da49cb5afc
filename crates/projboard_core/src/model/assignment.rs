//! Per-task set of assigned member index numbers.
//!
//! # Invariants
//! - No duplicates.
//! - Entries are non-owning lookup keys into the project roster.

use crate::model::member::Member;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberAssignmentSet {
    index_numbers: BTreeSet<u32>,
}

impl MemberAssignmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the member's index number; no-op when already assigned.
    pub fn add_member(&mut self, member: &Member) -> bool {
        self.add_index(member.index_number)
    }

    pub fn add_index(&mut self, index_number: u32) -> bool {
        self.index_numbers.insert(index_number)
    }

    /// Removes the member's index number; no-op when absent.
    pub fn remove_member(&mut self, member: &Member) -> bool {
        self.remove_index(member.index_number)
    }

    pub fn remove_index(&mut self, index_number: u32) -> bool {
        self.index_numbers.remove(&index_number)
    }

    pub fn contains(&self, index_number: u32) -> bool {
        self.index_numbers.contains(&index_number)
    }

    /// Assigned index numbers. Callers must not depend on iteration order.
    pub fn assigned_index_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.index_numbers.iter().copied()
    }

    pub fn size(&self) -> usize {
        self.index_numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_numbers.is_empty()
    }

    /// Drops `removed` and moves every higher index number down by one,
    /// mirroring the roster renumbering after a removal.
    ///
    /// Returns whether `removed` was assigned.
    pub fn shift_after_removal(&mut self, removed: u32) -> bool {
        let was_assigned = self.index_numbers.remove(&removed);
        self.index_numbers = self
            .index_numbers
            .iter()
            .map(|&index| if index > removed { index - 1 } else { index })
            .collect();
        was_assigned
    }
}

#[cfg(test)]
mod tests {
    use super::MemberAssignmentSet;

    #[test]
    fn add_and_remove_are_idempotent() {
        let mut set = MemberAssignmentSet::new();
        assert!(set.add_index(2));
        assert!(!set.add_index(2));
        assert_eq!(set.size(), 1);

        assert!(set.remove_index(2));
        assert!(!set.remove_index(2));
        assert!(set.is_empty());
    }

    #[test]
    fn shift_after_removal_renumbers_higher_entries_only() {
        let mut set = MemberAssignmentSet::new();
        set.add_index(1);
        set.add_index(3);
        set.add_index(4);

        assert!(!set.shift_after_removal(2));
        let indexes: Vec<u32> = set.assigned_index_numbers().collect();
        assert_eq!(indexes, vec![1, 2, 3]);

        assert!(set.shift_after_removal(2));
        let indexes: Vec<u32> = set.assigned_index_numbers().collect();
        assert_eq!(indexes, vec![1, 2]);
    }
}
