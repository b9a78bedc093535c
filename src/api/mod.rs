pub mod client;
pub mod models;

pub use client::{HttpMetricsSource, MetricsSource};
pub use models::{MetricsSnapshot, ModelStatus, Prediction, ScalingDecision, ScalingStatusView, StatusMetrics};
