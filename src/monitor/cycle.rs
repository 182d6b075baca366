//! Single-cycle orchestration: sample, diff, validate, report, persist

use crate::alerts::{Message, Notifier};
use crate::reconcile::{diff, validate, Decision};
use crate::sampler::{Sampler, StatusClient};
use crate::state::{MonitorState, StateStore};

use super::config::MonitorConfig;

/// Summary of what one cycle did
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Baseline committed (bootstrap or accepted update)
    Committed {
        total: usize,
        added: usize,
        removed: usize,
    },
    /// Update rejected; baseline left unchanged
    SkippedUpdate { reason: String },
    /// Zero-node alert raised or repeated
    CriticalAlert,
    /// Every sampling attempt failed; nothing sent, nothing mutated
    SampleFailed,
}

/// The reconciliation and alerting engine.
///
/// One `run_cycle` call is one full pass: sample the status source,
/// reconcile against the persisted baseline, notify, and commit. Cycles
/// never overlap and no outcome is fatal to the caller's loop.
pub struct Monitor {
    config: MonitorConfig,
    sampler: Sampler,
    notifier: Notifier,
    store: StateStore,
}

impl Monitor {
    /// Wire up the collaborators from a config
    pub fn new(config: MonitorConfig) -> Self {
        let client = StatusClient::new(&config.status_url, config.fetch_timeout);
        let sampler = Sampler::new(client, config.fetch_attempts, config.retry_backoff);
        let notifier = Notifier::new(&config.webhook_url);
        let store = StateStore::new(&config.state_path);

        Self {
            config,
            sampler,
            notifier,
            store,
        }
    }

    /// Run one monitoring cycle to completion
    pub async fn run_cycle(&self) -> CycleOutcome {
        let baseline = self.store.load();

        let snapshot = match self.sampler.sample().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, "Cycle skipped: could not sample network status");
                return CycleOutcome::SampleFailed;
            }
        };

        let decision = validate(baseline.as_ref(), &snapshot, self.config.churn_threshold);

        match decision {
            Decision::Accept => {
                let total = snapshot.nodes.len();
                let (message, outcome) = match &baseline {
                    None => (
                        Message::Initial {
                            total,
                            timestamp: snapshot.observed_at,
                        },
                        CycleOutcome::Committed {
                            total,
                            added: 0,
                            removed: 0,
                        },
                    ),
                    Some(previous) => {
                        let report = diff(&previous.nodes, &snapshot.nodes);
                        let outcome = CycleOutcome::Committed {
                            total,
                            added: report.added.len(),
                            removed: report.removed.len(),
                        };
                        (
                            Message::Update {
                                report,
                                timestamp: snapshot.observed_at,
                            },
                            outcome,
                        )
                    }
                };

                self.notify(&message).await;

                if let Err(e) = self.store.commit(&MonitorState::from_snapshot(&snapshot)) {
                    tracing::error!(error = %e, "Failed to persist accepted baseline");
                }

                tracing::info!(total, "Baseline updated");
                outcome
            }
            Decision::Reject { reason } => {
                let previous_count = baseline.as_ref().map(|b| b.total_nodes).unwrap_or(0);
                let message = Message::Skipped {
                    reason: reason.clone(),
                    previous_count,
                    current_count: snapshot.nodes.len(),
                    timestamp: snapshot.observed_at,
                };

                self.notify(&message).await;

                tracing::warn!(
                    reason = %reason,
                    previous = previous_count,
                    observed = snapshot.nodes.len(),
                    "Update skipped, baseline unchanged"
                );
                CycleOutcome::SkippedUpdate { reason }
            }
            Decision::CriticalAlert => {
                let last_known = baseline.as_ref().map(|b| b.total_nodes).unwrap_or(0);
                let message = Message::CriticalAlert {
                    last_known,
                    timestamp: snapshot.observed_at,
                };

                self.notify(&message).await;

                // Persist only the false -> true transition; repeat alerts
                // leave the record untouched
                if let Some(mut state) = baseline {
                    if !state.zero_alert_active {
                        state.zero_alert_active = true;
                        state.updated_at = snapshot.observed_at;
                        if let Err(e) = self.store.commit(&state) {
                            tracing::error!(error = %e, "Failed to persist alert state");
                        }
                    }
                }

                tracing::error!(last_known, "Zero-node critical alert");
                CycleOutcome::CriticalAlert
            }
        }
    }

    async fn notify(&self, message: &Message) {
        if let Err(e) = self.notifier.send(message).await {
            tracing::error!(
                error = %e,
                kind = message.kind(),
                "Failed to deliver notification"
            );
        }
    }
}
