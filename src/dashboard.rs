use crate::history::TimeSeriesWindow;
use crate::poller::{CycleOutcome, CycleResult, CycleSnapshot};
use chrono::{DateTime, Local};

pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch data. Please check if the backend is running.";

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Error(String),
    Ready(Box<CycleSnapshot>),
}

impl DashboardState {
    pub fn snapshot(&self) -> Option<&CycleSnapshot> {
        match self {
            DashboardState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Failed,
    Stale,
    Inactive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub applied: u64,
    pub failed: u64,
    pub stale: u64,
}

/// Results are applied in completion order, but only when their sequence
/// number is newer than the last one applied.
#[derive(Debug)]
pub struct Dashboard {
    state: DashboardState,
    window: TimeSeriesWindow,
    last_applied: u64,
    last_update: Option<DateTime<Local>>,
    stats: CycleStats,
    alive: bool,
}

impl Dashboard {
    pub fn new(window_capacity: usize) -> Self {
        Self {
            state: DashboardState::Loading,
            window: TimeSeriesWindow::new(window_capacity),
            last_applied: 0,
            last_update: None,
            stats: CycleStats::default(),
            alive: true,
        }
    }

    pub fn apply(&mut self, result: CycleResult) -> ApplyOutcome {
        if !self.alive {
            log::debug!("Ignoring cycle {} after teardown", result.seq);
            return ApplyOutcome::Inactive;
        }

        if result.seq <= self.last_applied {
            log::debug!(
                "Discarding stale cycle {} (already applied {})",
                result.seq,
                self.last_applied
            );
            self.stats.stale += 1;
            return ApplyOutcome::Stale;
        }

        self.last_applied = result.seq;
        self.last_update = Some(result.completed_at);

        match result.outcome {
            CycleOutcome::Ready(snapshot) => {
                self.window.record(&snapshot.metrics, &snapshot.prediction);
                self.state = DashboardState::Ready(snapshot);
                self.stats.applied += 1;
                ApplyOutcome::Applied
            }
            CycleOutcome::Failed(_) => {
                self.state = DashboardState::Error(FETCH_ERROR_MESSAGE.to_string());
                self.stats.failed += 1;
                ApplyOutcome::Failed
            }
        }
    }

    pub fn teardown(&mut self) {
        if self.alive {
            self.alive = false;
            self.window.clear();
            self.state = DashboardState::Loading;
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn window(&self) -> &TimeSeriesWindow {
        &self.window
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DashboardState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            DashboardState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn last_applied(&self) -> u64 {
        self.last_applied
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    pub fn stats(&self) -> CycleStats {
        self.stats
    }
}
