//! Change validation: churn threshold and the zero-node alert machine

use crate::state::{MonitorState, Snapshot};

use super::diff::diff;

/// Outcome of validating a candidate snapshot against the baseline
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Commit the candidate as the new baseline
    Accept,
    /// Leave the baseline unchanged and send a skipped-update notice
    Reject { reason: String },
    /// Zero nodes observed against a non-zero baseline; baseline kept,
    /// alert repeated every cycle until a non-zero sample arrives
    CriticalAlert,
}

/// Validate a candidate snapshot against the persisted baseline.
///
/// The zero-node check runs before the churn rule: a total outage outranks
/// any amount of churn. While the zero alert is active the baseline is
/// stale, so the first non-zero candidate is accepted without a threshold
/// check to let the machine recover.
pub fn validate(
    baseline: Option<&MonitorState>,
    candidate: &Snapshot,
    churn_threshold: f64,
) -> Decision {
    let baseline = match baseline {
        Some(baseline) => baseline,
        // First-ever run: accept whatever we see
        None => return Decision::Accept,
    };

    if candidate.nodes.is_empty() && baseline.total_nodes > 0 {
        return Decision::CriticalAlert;
    }

    if baseline.zero_alert_active {
        return Decision::Accept;
    }

    let report = diff(&baseline.nodes, &candidate.nodes);
    let base = baseline.total_nodes.max(1) as f64;
    if report.churn() as f64 / base > churn_threshold {
        return Decision::Reject {
            reason: "change exceeds threshold".to_string(),
        };
    }

    Decision::Accept
}
