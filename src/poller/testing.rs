use super::cycle::{CycleOutcome, CycleResult, CycleSnapshot};
use crate::api::{
    MetricsSnapshot, MetricsSource, ModelStatus, Prediction, ScalingDecision, ScalingStatusView,
    StatusMetrics,
};
use crate::error::{Endpoint, FetchError, FetchResult};
use async_trait::async_trait;
use chrono::{Local, TimeZone};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn metrics(cpu: f64, second: u32) -> MetricsSnapshot {
    MetricsSnapshot {
        timestamp: Local.with_ymd_and_hms(2024, 5, 1, 12, 0, second % 60).unwrap(),
        cpu_usage: cpu,
        memory_usage: 50.0,
        memory_available: None,
    }
}

pub fn prediction(predicted: f64) -> Prediction {
    Prediction {
        predicted_cpu: predicted,
        current_cpu: None,
        prediction_horizon: None,
        timestamp: None,
    }
}

pub fn status(decision: ScalingDecision) -> ScalingStatusView {
    ScalingStatusView {
        scaling_decision: decision,
        current_metrics: StatusMetrics { cpu_usage: 50.0, memory_usage: 50.0 },
        last_prediction: Some(50.0),
        model_status: ModelStatus::Loaded,
        timestamp: Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

pub fn ready(seq: u64, cpu: f64, predicted: f64) -> CycleResult {
    CycleResult {
        seq,
        completed_at: Local::now(),
        outcome: CycleOutcome::Ready(Box::new(CycleSnapshot {
            metrics: metrics(cpu, seq as u32),
            prediction: prediction(predicted),
            status: status(ScalingDecision::NoAction),
        })),
    }
}

pub fn failed(seq: u64) -> CycleResult {
    CycleResult {
        seq,
        completed_at: Local::now(),
        outcome: CycleOutcome::Failed(FetchError::Protocol {
            endpoint: Endpoint::Status,
            status: 500,
        }),
    }
}

pub struct FakeSource {
    pub cpu: Mutex<f64>,
    pub predicted: Mutex<f64>,
    pub fail_status: AtomicBool,
    pub delay: Duration,
    pub calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(cpu: f64, predicted: f64) -> Self {
        Self {
            cpu: Mutex::new(cpu),
            predicted: Mutex::new(predicted),
            fail_status: AtomicBool::new(false),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn cycles_started(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl MetricsSource for FakeSource {
    async fn current_metrics(&self) -> FetchResult<MetricsSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let cpu = *self.cpu.lock().unwrap();
        self.pause().await;
        Ok(metrics(cpu, 0))
    }

    async fn prediction(&self) -> FetchResult<Prediction> {
        let predicted = *self.predicted.lock().unwrap();
        self.pause().await;
        Ok(prediction(predicted))
    }

    async fn status(&self) -> FetchResult<ScalingStatusView> {
        self.pause().await;
        if self.fail_status.load(Ordering::SeqCst) {
            return Err(FetchError::Protocol { endpoint: Endpoint::Status, status: 500 });
        }
        Ok(status(ScalingDecision::ScaleUp))
    }
}
