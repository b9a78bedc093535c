use crate::api::MetricsSource;
use crate::config::Config;
use crate::dashboard::{ApplyOutcome, Dashboard};
use crate::error::Result;
use crate::poller::{CycleResult, FetchCycle, PollHandle, PollScheduler};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogMode {
    None,
    Help,
    Details,
}

pub struct App {
    pub config: Config,
    pub dashboard: Dashboard,
    scheduler: PollScheduler,
    poll: Option<PollHandle>,
    results_tx: UnboundedSender<CycleResult>,
    results_rx: UnboundedReceiver<CycleResult>,
    pub running: bool,
    pub paused: bool,
    pub dialog_mode: DialogMode,

    // Status message for user feedback
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    /// Must be called from within a tokio runtime.
    pub fn new(config: Config, source: Arc<dyn MetricsSource>) -> Result<Self> {
        let interval = Duration::from_millis(config.refresh.interval_ms);
        let scheduler = PollScheduler::new(FetchCycle::new(source), interval)?;
        let dashboard = Dashboard::new(config.refresh.history_samples);
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        Ok(Self {
            config,
            dashboard,
            scheduler,
            poll: None,
            results_tx,
            results_rx,
            running: true,
            paused: false,
            dialog_mode: DialogMode::None,
            status_message: None,
            status_message_time: None,
        })
    }

    pub fn start_polling(&mut self) {
        if self.poll.as_ref().map(|p| p.is_running()).unwrap_or(false) {
            return;
        }
        self.poll = Some(self.scheduler.start(self.results_tx.clone()));
    }

    pub fn stop_polling(&mut self) {
        if let Some(mut poll) = self.poll.take() {
            poll.stop();
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poll.as_ref().map(|p| p.is_running()).unwrap_or(false)
    }

    pub fn update(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(result) = self.results_rx.try_recv() {
            if self.apply(result) == ApplyOutcome::Applied {
                applied += 1;
            }
        }

        self.update_status_message();
        applied
    }

    pub async fn next_result(&mut self) -> Option<CycleResult> {
        self.results_rx.recv().await
    }

    pub fn apply(&mut self, result: CycleResult) -> ApplyOutcome {
        let seq = result.seq;
        let outcome = self.dashboard.apply(result);
        match outcome {
            ApplyOutcome::Applied => log::debug!("Applied cycle {}", seq),
            ApplyOutcome::Failed => log::info!("Cycle {} failed, showing error state", seq),
            ApplyOutcome::Stale | ApplyOutcome::Inactive => {}
        }
        outcome
    }

    pub fn refresh_now(&mut self) {
        let seq = self.scheduler.trigger(&self.results_tx);
        self.set_status_message(format!("Refreshing (cycle {})", seq));
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.stop_polling();
            self.set_status_message("Polling paused".to_string());
        } else {
            self.start_polling();
            self.set_status_message("Polling resumed".to_string());
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn shutdown(&mut self) {
        self.stop_polling();
        self.results_rx.close();
        self.dashboard.teardown();
    }

    pub fn show_help_dialog(&mut self) {
        self.dialog_mode = DialogMode::Help;
    }

    pub fn show_details_dialog(&mut self) {
        self.dialog_mode = DialogMode::Details;
    }

    pub fn close_dialog(&mut self) {
        self.dialog_mode = DialogMode::None;
    }

    pub fn set_status_message(&mut self, msg: String) {
        log::info!("Status: {}", msg);
        self.status_message = Some(msg);
        self.status_message_time = Some(Instant::now());
    }

    pub fn update_status_message(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() > 5 {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::DashboardState;
    use crate::poller::testing::FakeSource;
    use std::sync::atomic::Ordering;

    fn app(source: Arc<FakeSource>) -> App {
        let mut config = Config::default();
        config.refresh.interval_ms = 1000;
        App::new(config, source).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_applies_completed_cycles() {
        let source = Arc::new(FakeSource::new(40.0, 42.0));
        let mut app = app(source);

        app.start_polling();
        tokio::time::sleep(Duration::from_millis(2100)).await;

        assert_eq!(app.update(), 3);
        assert_eq!(app.dashboard.window().len(), 3);
        assert!(matches!(app.dashboard.state(), DashboardState::Ready(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_polling() {
        let source = Arc::new(FakeSource::new(40.0, 42.0));
        let mut app = app(source.clone());

        app.start_polling();
        tokio::time::sleep(Duration::from_millis(100)).await;
        app.toggle_pause();
        assert!(!app.is_polling());

        let started = source.cycles_started();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(source.cycles_started(), started);

        app.toggle_pause();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(app.is_polling());
        assert_eq!(source.cycles_started(), started + 1);

        app.update();
        assert_eq!(app.dashboard.last_applied(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_then_recovery() {
        let source = Arc::new(FakeSource::new(40.0, 42.0));
        let mut app = app(source.clone());

        app.refresh_now();
        tokio::time::sleep(Duration::from_millis(10)).await;
        app.update();

        source.fail_status.store(true, Ordering::SeqCst);
        app.refresh_now();
        tokio::time::sleep(Duration::from_millis(10)).await;
        app.update();
        assert!(app.dashboard.error().is_some());

        source.fail_status.store(false, Ordering::SeqCst);
        app.refresh_now();
        tokio::time::sleep(Duration::from_millis(10)).await;
        app.update();

        assert!(matches!(app.dashboard.state(), DashboardState::Ready(_)));
        assert_eq!(app.dashboard.window().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_discards_late_results() {
        let source = Arc::new(FakeSource::new(40.0, 42.0).with_delay(Duration::from_secs(2)));
        let mut app = app(source);

        app.start_polling();
        tokio::time::sleep(Duration::from_millis(100)).await;
        app.shutdown();
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(app.update(), 0);
        assert!(!app.dashboard.is_alive());
        assert!(app.dashboard.window().is_empty());
    }
}
