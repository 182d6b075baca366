//! Core data model: node identifiers, node sets, and observations

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A unique set of node identifiers (`host:port` strings).
///
/// Membership is set-semantic: equality and difference ignore order, and
/// duplicate inserts are no-ops. Iteration yields identifiers in first-seen
/// order so truncated report listings stay aligned with what the sampler
/// actually resolved.
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl NodeSet {
    /// Create an empty node set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node identifier; returns false if already present
    pub fn insert(&mut self, node: impl Into<String>) -> bool {
        let node = node.into();
        if self.members.contains(&node) {
            return false;
        }
        self.members.insert(node.clone());
        self.order.push(node);
        true
    }

    /// Check whether a node is a member
    pub fn contains(&self, node: &str) -> bool {
        self.members.contains(node)
    }

    /// Number of nodes in the set
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate identifiers in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Nodes in `self` that are not in `other`, preserving discovery order
    pub fn difference(&self, other: &NodeSet) -> NodeSet {
        self.iter()
            .filter(|node| !other.contains(node))
            .cloned()
            .collect()
    }
}

impl PartialEq for NodeSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for NodeSet {}

impl FromIterator<String> for NodeSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = NodeSet::new();
        for node in iter {
            set.insert(node);
        }
        set
    }
}

impl Serialize for NodeSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.order.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NodeSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nodes = Vec::<String>::deserialize(deserializer)?;
        Ok(nodes.into_iter().collect())
    }
}

/// One observation of network membership
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Observed node set
    pub nodes: NodeSet,
    /// When the observation was made
    pub observed_at: DateTime<Utc>,
}

impl Snapshot {
    /// Create a snapshot with an explicit observation time
    pub fn new(nodes: NodeSet, observed_at: DateTime<Utc>) -> Self {
        Self { nodes, observed_at }
    }

    /// Create a snapshot observed now
    pub fn now(nodes: NodeSet) -> Self {
        Self::new(nodes, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(nodes: &[&str]) -> NodeSet {
        nodes.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_duplicate_insert_ignored() {
        let mut nodes = NodeSet::new();
        assert!(nodes.insert("10.0.0.1:3000"));
        assert!(!nodes.insert("10.0.0.1:3000"));
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = set(&["a:1", "b:2", "c:3"]);
        let b = set(&["c:3", "a:1", "b:2"]);
        assert_eq!(a, b);

        let c = set(&["a:1", "b:2"]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_iteration_preserves_discovery_order() {
        let nodes = set(&["c:3", "a:1", "b:2"]);
        let listed: Vec<&str> = nodes.iter().map(|s| s.as_str()).collect();
        assert_eq!(listed, vec!["c:3", "a:1", "b:2"]);
    }

    #[test]
    fn test_difference() {
        let a = set(&["a:1", "b:2", "c:3"]);
        let b = set(&["b:2", "d:4"]);

        let only_a = a.difference(&b);
        assert_eq!(only_a, set(&["a:1", "c:3"]));

        let only_b = b.difference(&a);
        assert_eq!(only_b, set(&["d:4"]));
    }

    #[test]
    fn test_deserialization_dedups() {
        let nodes: NodeSet = serde_json::from_str(r#"["a:1", "b:2", "a:1"]"#).unwrap();
        assert_eq!(nodes.len(), 2);
    }
}
