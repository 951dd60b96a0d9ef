use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::config::ClassifyConfig;
use crate::dto::classification::{ClassificationResult, ClassificationView};
use crate::services::backend_client::BackendClient;
use crate::services::classification_stats::{self, ClassificationStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    Idle,
    Running,
}

/// Watched session state. Observers turn it into a [`ClassificationSnapshot`].
#[derive(Debug, Clone)]
pub struct SessionState {
    phase: RunPhase,
    progress: u8,
    generation: u64,
    /// Last generation whose `/classify` fetch has succeeded, failed or been superseded.
    settled_generation: u64,
    results: Vec<ClassificationResult>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationSnapshot {
    pub phase: RunPhase,
    pub progress: u8,
    pub results: Vec<ClassificationView>,
    pub stats: ClassificationStats,
    pub avg_confidence_display: String,
    pub avg_process_time_display: String,
}

impl From<&SessionState> for ClassificationSnapshot {
    fn from(state: &SessionState) -> Self {
        let stats = classification_stats::aggregate(&state.results);
        Self {
            phase: state.phase,
            progress: state.progress,
            results: state.results.iter().cloned().map(ClassificationView::from).collect(),
            avg_confidence_display: stats.avg_confidence_display(),
            avg_process_time_display: stats.avg_process_time_display(),
            stats,
        }
    }
}

/// Classification trigger: `Idle -> Running -> Idle`.
///
/// The progress bar is a fixed-interval animation that never looks at the
/// backend. Once it reaches 100% the session goes back to `Idle` and issues a
/// single `/classify` request; a successful response replaces the result set,
/// a failure is only logged.
pub struct ClassificationSession {
    state: watch::Sender<SessionState>,
    tick: Duration,
    step: u8,
}

impl ClassificationSession {
    pub fn new(config: &ClassifyConfig) -> Self {
        let (state, _) = watch::channel(SessionState {
            phase: RunPhase::Idle,
            progress: 0,
            generation: 0,
            settled_generation: 0,
            results: Vec::new(),
        });

        Self {
            state,
            tick: Duration::from_millis(config.tick_interval_ms.max(1)),
            step: config.progress_step.clamp(1, 100),
        }
    }

    pub fn snapshot(&self) -> ClassificationSnapshot {
        ClassificationSnapshot::from(&*self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Starts a run. Returns `None` when a run is already in progress.
    pub fn start(self: &std::sync::Arc<Self>, backend: BackendClient) -> Option<JoinHandle<()>> {
        let mut generation = 0;
        let started = self.state.send_if_modified(|state| {
            if state.phase == RunPhase::Running {
                return false;
            }
            state.phase = RunPhase::Running;
            state.progress = 0;
            state.generation += 1;
            generation = state.generation;
            true
        });

        if !started {
            return None;
        }

        tracing::info!("Classification run {generation} started");
        let session = self.clone();
        Some(tokio::spawn(async move {
            session.animate_progress().await;
            session.finish(generation, backend).await;
        }))
    }

    async fn animate_progress(&self) {
        let mut ticker = interval_at(Instant::now() + self.tick, self.tick);
        loop {
            ticker.tick().await;
            let mut complete = false;
            self.state.send_modify(|state| {
                if state.progress >= 100 {
                    complete = true;
                } else {
                    state.progress = state.progress.saturating_add(self.step).min(100);
                }
            });
            if complete {
                break;
            }
        }
    }

    async fn finish(&self, generation: u64, backend: BackendClient) {
        self.state.send_modify(|state| state.phase = RunPhase::Idle);

        let outcome = backend.classify().await;
        if let Err(e) = &outcome {
            tracing::error!("Classification failed: {e}");
        }

        let mut superseded = false;
        let mut applied = None;
        self.state.send_modify(|state| {
            state.settled_generation = state.settled_generation.max(generation);
            if state.generation != generation {
                superseded = true;
            } else if let Ok(results) = outcome {
                applied = Some(results.len());
                state.results = results;
            }
        });

        if superseded {
            tracing::debug!("Discarding results of superseded classification run {generation}");
        } else if let Some(count) = applied {
            tracing::info!("Classification run {generation} returned {count} result(s)");
        }
    }
}

impl SessionState {
    /// Idle, and the latest run's fetch has come back one way or the other.
    pub fn is_settled(&self) -> bool {
        self.phase == RunPhase::Idle && self.settled_generation == self.generation
    }
}
