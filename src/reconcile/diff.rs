//! Membership diff between two snapshots

use crate::state::NodeSet;

/// Changes between the baseline and the current observation
#[derive(Debug, Clone, Default)]
pub struct ChangeReport {
    /// Nodes present now but not in the baseline
    pub added: NodeSet,
    /// Nodes in the baseline but gone now
    pub removed: NodeSet,
    /// Baseline node count
    pub previous_count: usize,
    /// Current node count
    pub current_count: usize,
}

impl ChangeReport {
    /// Combined count of added and removed nodes
    pub fn churn(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    /// Whether membership is unchanged
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compute the membership changes from `previous` to `current`.
///
/// Pure and deterministic. Invariant: `current = (previous - removed) + added`,
/// and `added` / `removed` are disjoint.
pub fn diff(previous: &NodeSet, current: &NodeSet) -> ChangeReport {
    ChangeReport {
        added: current.difference(previous),
        removed: previous.difference(current),
        previous_count: previous.len(),
        current_count: current.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(nodes: &[&str]) -> NodeSet {
        nodes.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_diff_added_and_removed() {
        let previous = set(&["a:1", "b:2", "c:3"]);
        let current = set(&["b:2", "c:3", "d:4", "e:5"]);

        let report = diff(&previous, &current);
        assert_eq!(report.added, set(&["d:4", "e:5"]));
        assert_eq!(report.removed, set(&["a:1"]));
        assert_eq!(report.previous_count, 3);
        assert_eq!(report.current_count, 4);
        assert_eq!(report.churn(), 3);
    }

    #[test]
    fn test_diff_identical_sets() {
        let nodes = set(&["a:1", "b:2"]);
        let report = diff(&nodes, &nodes);
        assert!(report.is_unchanged());
        assert_eq!(report.churn(), 0);
    }

    #[test]
    fn test_diff_sets_are_disjoint_and_reconstruct_current() {
        let previous = set(&["a:1", "b:2", "c:3", "d:4"]);
        let current = set(&["c:3", "d:4", "e:5"]);
        let report = diff(&previous, &current);

        for node in report.added.iter() {
            assert!(!report.removed.contains(node));
        }

        // current must equal (previous - removed) + added exactly
        let mut rebuilt = previous.difference(&report.removed);
        for node in report.added.iter() {
            rebuilt.insert(node.clone());
        }
        assert_eq!(rebuilt, current);
    }
}
