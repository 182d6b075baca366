//! Cycle report formatting into chat messages

use chrono::{DateTime, Utc};

use crate::reconcile::ChangeReport;
use crate::state::NodeSet;

/// Longest node list rendered in full; anything beyond is summarized
pub const MAX_LISTED: usize = 5;

/// Rendered outcome of one monitoring cycle
#[derive(Debug, Clone)]
pub enum Message {
    /// First-ever run: totals only, no diff exists yet
    Initial {
        total: usize,
        timestamp: DateTime<Utc>,
    },
    /// Accepted membership change
    Update {
        report: ChangeReport,
        timestamp: DateTime<Utc>,
    },
    /// Update rejected by the churn threshold; baseline unchanged
    Skipped {
        reason: String,
        previous_count: usize,
        current_count: usize,
        timestamp: DateTime<Utc>,
    },
    /// Zero nodes observed; repeats every cycle while the outage lasts
    CriticalAlert {
        last_known: usize,
        timestamp: DateTime<Utc>,
    },
}

impl Message {
    /// Short variant name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Initial { .. } => "initial",
            Message::Update { .. } => "update",
            Message::Skipped { .. } => "skipped",
            Message::CriticalAlert { .. } => "critical_alert",
        }
    }

    /// Render the chat text (emoji + `*bold*` markup)
    pub fn render(&self) -> String {
        match self {
            Message::Initial { total, timestamp } => {
                let mut out = format!(
                    "🚀 *Initial Node Network Status* - {}\n\n",
                    format_timestamp(timestamp)
                );
                out.push_str(&format!("• Total Active Nodes: {}\n", total));
                out
            }
            Message::Update { report, timestamp } => {
                let mut out = format!(
                    "📊 *Node Network Status Update* - {}\n\n",
                    format_timestamp(timestamp)
                );
                out.push_str(&format!("• Total Active Nodes: {}\n", report.current_count));

                if !report.added.is_empty() {
                    out.push_str(&format!("\n🆕 *New Nodes ({})* 🆕\n", report.added.len()));
                    push_node_list(&mut out, &report.added);
                }

                if !report.removed.is_empty() {
                    out.push_str(&format!(
                        "\n⚠️ *Offline Nodes ({})* ⚠️\n",
                        report.removed.len()
                    ));
                    push_node_list(&mut out, &report.removed);
                }

                out
            }
            Message::Skipped {
                reason,
                previous_count,
                current_count,
                timestamp,
            } => {
                let mut out = format!(
                    "⚠️ *Node Network Update Skipped* - {}\n\n",
                    format_timestamp(timestamp)
                );
                out.push_str(&format!("• Reason: {}\n", reason));
                out.push_str(&format!("• Known Nodes: {}\n", previous_count));
                out.push_str(&format!("• Observed Nodes: {}\n", current_count));
                out
            }
            Message::CriticalAlert {
                last_known,
                timestamp,
            } => {
                let mut out = format!(
                    "🚨 *CRITICAL: No Active Nodes* - {}\n\n",
                    format_timestamp(timestamp)
                );
                out.push_str(&format!(
                    "• All {} previously known nodes are unreachable\n",
                    last_known
                ));
                out.push_str("• Baseline preserved; this alert repeats until nodes return\n");
                out
            }
        }
    }
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Append up to [`MAX_LISTED`] node lines in discovery order, then a
/// remainder count
fn push_node_list(out: &mut String, nodes: &NodeSet) {
    for node in nodes.iter().take(MAX_LISTED) {
        out.push_str(&format!("• {}\n", node));
    }
    if nodes.len() > MAX_LISTED {
        out.push_str(&format!("• ... and {} more\n", nodes.len() - MAX_LISTED));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(nodes: &[&str]) -> NodeSet {
        nodes.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_initial_renders_total_only() {
        let message = Message::Initial {
            total: 23,
            timestamp: Utc::now(),
        };
        let text = message.render();
        assert!(text.contains("Initial Node Network Status"));
        assert!(text.contains("Total Active Nodes: 23"));
        assert!(!text.contains("New Nodes"));
    }

    #[test]
    fn test_update_lists_changes() {
        let report = ChangeReport {
            added: set(&["a:1", "b:2"]),
            removed: set(&["c:3"]),
            previous_count: 10,
            current_count: 11,
        };
        let text = Message::Update {
            report,
            timestamp: Utc::now(),
        }
        .render();

        assert!(text.contains("Total Active Nodes: 11"));
        assert!(text.contains("New Nodes (2)"));
        assert!(text.contains("• a:1"));
        assert!(text.contains("Offline Nodes (1)"));
        assert!(text.contains("• c:3"));
    }

    #[test]
    fn test_update_without_changes_omits_sections() {
        let report = ChangeReport {
            previous_count: 5,
            current_count: 5,
            ..Default::default()
        };
        let text = Message::Update {
            report,
            timestamp: Utc::now(),
        }
        .render();

        assert!(!text.contains("New Nodes"));
        assert!(!text.contains("Offline Nodes"));
    }

    #[test]
    fn test_long_list_truncated() {
        let nodes = set(&["a:1", "b:2", "c:3", "d:4", "e:5", "f:6", "g:7", "h:8"]);
        let report = ChangeReport {
            added: nodes,
            previous_count: 0,
            current_count: 8,
            ..Default::default()
        };
        let text = Message::Update {
            report,
            timestamp: Utc::now(),
        }
        .render();

        assert!(text.contains("• e:5"));
        assert!(!text.contains("• f:6"));
        assert!(text.contains("... and 3 more"));
    }

    #[test]
    fn test_truncation_uses_discovery_order() {
        // Deliberately unsorted: output must keep this order, not sort it
        let nodes = set(&["z:9", "a:1", "m:5", "b:2", "k:4", "c:3"]);
        let report = ChangeReport {
            added: nodes,
            previous_count: 0,
            current_count: 6,
            ..Default::default()
        };
        let text = Message::Update {
            report,
            timestamp: Utc::now(),
        }
        .render();

        assert!(text.contains("• z:9"));
        assert!(text.contains("• k:4"));
        assert!(!text.contains("• c:3"));
        assert!(text.contains("... and 1 more"));
    }

    #[test]
    fn test_skipped_has_no_node_lists() {
        let text = Message::Skipped {
            reason: "change exceeds threshold".to_string(),
            previous_count: 10,
            current_count: 14,
            timestamp: Utc::now(),
        }
        .render();

        assert!(text.contains("Update Skipped"));
        assert!(text.contains("change exceeds threshold"));
        assert!(text.contains("Known Nodes: 10"));
        assert!(text.contains("Observed Nodes: 14"));
    }

    #[test]
    fn test_critical_alert_names_last_known_count() {
        let text = Message::CriticalAlert {
            last_known: 23,
            timestamp: Utc::now(),
        }
        .render();

        assert!(text.contains("CRITICAL"));
        assert!(text.contains("All 23 previously known nodes"));
    }
}
