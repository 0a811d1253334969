//! Online-users roster.

use parley_client::PresenceSnapshot;

/// Projection of the latest presence snapshot.
///
/// Every snapshot replaces the roster outright; there is no merging.
/// Duplicates and wire order are kept as sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceTracker {
    users: Vec<String>,
}

impl PresenceTracker {
    /// Empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the roster with `snapshot`.
    pub fn apply(&mut self, snapshot: PresenceSnapshot) {
        self.users = snapshot.users;
    }

    /// Forget everyone. Used when the session ends.
    pub fn clear(&mut self) {
        self.users.clear();
    }

    /// Users in wire order.
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True if no one is listed.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// True if `name` is listed. Exact, case-sensitive match.
    pub fn contains(&self, name: &str) -> bool {
        self.users.iter().any(|u| u == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(users: &[&str]) -> PresenceSnapshot {
        PresenceSnapshot { users: users.iter().map(ToString::to_string).collect() }
    }

    #[test]
    fn snapshot_replaces_roster() {
        let mut tracker = PresenceTracker::new();

        tracker.apply(snapshot(&["alice", "bob", "carol"]));
        tracker.apply(snapshot(&["dave"]));

        assert_eq!(tracker.users(), ["dave"]);
        assert!(!tracker.contains("alice"));
        assert!(tracker.contains("dave"));
    }

    #[test]
    fn empty_snapshot_clears() {
        let mut tracker = PresenceTracker::new();
        tracker.apply(snapshot(&["alice"]));

        tracker.apply(PresenceSnapshot::default());

        assert!(tracker.is_empty());
        assert_eq!(tracker.len(), 0);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut tracker = PresenceTracker::new();
        tracker.apply(snapshot(&["alice", "alice"]));

        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn contains_is_case_sensitive() {
        let mut tracker = PresenceTracker::new();
        tracker.apply(snapshot(&["Alice"]));

        assert!(!tracker.contains("alice"));
    }
}
