use crate::api::{MetricsSnapshot, MetricsSource, Prediction, ScalingStatusView};
use crate::error::FetchError;
use chrono::{DateTime, Local};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct CycleSnapshot {
    pub metrics: MetricsSnapshot,
    pub prediction: Prediction,
    pub status: ScalingStatusView,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Ready(Box<CycleSnapshot>),
    Failed(FetchError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleResult {
    pub seq: u64,
    pub completed_at: DateTime<Local>,
    pub outcome: CycleOutcome,
}

impl CycleResult {
    pub fn is_ready(&self) -> bool {
        matches!(self.outcome, CycleOutcome::Ready(_))
    }
}

#[derive(Clone)]
pub struct FetchCycle {
    source: Arc<dyn MetricsSource>,
}

impl FetchCycle {
    pub fn new(source: Arc<dyn MetricsSource>) -> Self {
        Self { source }
    }

    /// All three requests are in flight together; the cycle settles once
    /// every one of them has. A single failure discards the others.
    pub async fn run(&self, seq: u64) -> CycleResult {
        let (metrics, prediction, status) = tokio::join!(
            self.source.current_metrics(),
            self.source.prediction(),
            self.source.status(),
        );

        let outcome = match (metrics, prediction, status) {
            (Ok(metrics), Ok(prediction), Ok(status)) => {
                CycleOutcome::Ready(Box::new(CycleSnapshot { metrics, prediction, status }))
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                log::warn!("Cycle {} failed: {}", seq, e);
                CycleOutcome::Failed(e)
            }
        };

        CycleResult {
            seq,
            completed_at: Local::now(),
            outcome,
        }
    }
}
