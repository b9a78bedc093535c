use super::cycle::{CycleResult, FetchCycle};
use crate::error::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub type ResultSink = UnboundedSender<CycleResult>;

/// The sequence counter lives on the scheduler, not on a handle, so cycles
/// from successive start/stop sessions keep increasing numbers.
pub struct PollScheduler {
    cycle: FetchCycle,
    interval: Duration,
    sequence: Arc<AtomicU64>,
    runtime: Handle,
}

impl PollScheduler {
    /// Must be called from within a tokio runtime.
    pub fn new(cycle: FetchCycle, interval: Duration) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| Error::Runtime(format!("No tokio runtime available: {}", e)))?;

        Ok(Self {
            cycle,
            interval: interval.max(Duration::from_millis(1)),
            sequence: Arc::new(AtomicU64::new(0)),
            runtime,
        })
    }

    pub fn last_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    pub fn start(&self, sink: ResultSink) -> PollHandle {
        let stopped = Arc::new(Mutex::new(false));
        let dispatched = Arc::new(AtomicU64::new(0));

        let task = {
            let stopped = stopped.clone();
            let dispatched = dispatched.clone();
            let cycle = self.cycle.clone();
            let sequence = self.sequence.clone();
            let runtime = self.runtime.clone();
            let interval = self.interval;

            self.runtime.spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

                loop {
                    ticker.tick().await;

                    // Held across the dispatch so stop() cannot return mid-dispatch.
                    {
                        let guard = lock(&stopped);
                        if *guard || sink.is_closed() {
                            break;
                        }
                        dispatch(&runtime, &cycle, &sequence, &sink);
                        dispatched.fetch_add(1, Ordering::SeqCst);
                    }
                }

                log::debug!("Poll loop exited");
            })
        };

        log::info!("Polling every {}ms", self.interval.as_millis());

        PollHandle {
            stopped,
            dispatched,
            task: Some(task),
        }
    }

    pub fn trigger(&self, sink: &ResultSink) -> u64 {
        dispatch(&self.runtime, &self.cycle, &self.sequence, sink)
    }
}

fn dispatch(runtime: &Handle, cycle: &FetchCycle, sequence: &AtomicU64, sink: &ResultSink) -> u64 {
    let seq = sequence.fetch_add(1, Ordering::SeqCst) + 1;
    let cycle = cycle.clone();
    let sink = sink.clone();

    log::debug!("Dispatching cycle {}", seq);
    runtime.spawn(async move {
        let result = cycle.run(seq).await;
        // Receiver gone means the dashboard was torn down.
        if sink.send(result).is_err() {
            log::debug!("Dropping result of cycle {}: no receiver", seq);
        }
    });

    seq
}

fn lock(flag: &Mutex<bool>) -> MutexGuard<'_, bool> {
    flag.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct PollHandle {
    stopped: Arc<Mutex<bool>>,
    dispatched: Arc<AtomicU64>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Idempotent. Once this returns no further cycle is dispatched by this
    /// handle's loop; cycles already in flight still complete.
    pub fn stop(&mut self) {
        *lock(&self.stopped) = true;
        if let Some(task) = self.task.take() {
            task.abort();
            log::info!("Polling stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        !*lock(&self.stopped)
            && self.task.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::SeqCst)
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
