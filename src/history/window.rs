use super::buffer::CircularBuffer;
use crate::api::{MetricsSnapshot, Prediction};
use chrono::{DateTime, Local};

pub const WINDOW_CAPACITY: usize = 20;

pub const LABEL_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub current: f64,
    pub predicted: f64,
}

/// Points are stored as a single record so the label, current and predicted
/// projections can never drift out of alignment.
#[derive(Debug, Clone)]
pub struct TimeSeriesWindow {
    points: CircularBuffer<ChartPoint>,
}

impl TimeSeriesWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: CircularBuffer::new(capacity),
        }
    }

    pub fn record(&mut self, metrics: &MetricsSnapshot, prediction: &Prediction) {
        self.push(metrics.timestamp, metrics.cpu_usage, prediction.predicted_cpu);
    }

    pub fn push(&mut self, timestamp: DateTime<Local>, current: f64, predicted: f64) {
        let point = ChartPoint {
            label: timestamp.format(LABEL_FORMAT).to_string(),
            current,
            predicted,
        };
        self.points.push(point, timestamp);
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn current(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.current).collect()
    }

    pub fn predicted(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted).collect()
    }

    pub fn chart_series(&self) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| ((i as f64, p.current), (i as f64, p.predicted)))
            .unzip()
    }

    pub fn points(&self) -> impl Iterator<Item = &ChartPoint> {
        self.points.iter()
    }

    pub fn buffer(&self) -> &CircularBuffer<ChartPoint> {
        &self.points
    }

    pub fn latest(&self) -> Option<&ChartPoint> {
        self.points.get_latest()
    }

    pub fn oldest(&self) -> Option<&ChartPoint> {
        self.points.get_oldest()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for TimeSeriesWindow {
    fn default() -> Self {
        Self::new(WINDOW_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(second: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 10, 0, second).unwrap()
    }

    #[test]
    fn test_projections_stay_aligned() {
        let mut window = TimeSeriesWindow::default();
        for i in 0..30 {
            window.push(at(i % 60), i as f64, i as f64 + 1.0);
            assert_eq!(window.labels().len(), window.current().len());
            assert_eq!(window.current().len(), window.predicted().len());
            assert_eq!(window.len(), ((i + 1) as usize).min(WINDOW_CAPACITY));
        }
    }

    #[test]
    fn test_full_window_evicts_oldest() {
        let mut window = TimeSeriesWindow::new(3);
        window.push(at(1), 10.0, 11.0);
        window.push(at(2), 20.0, 21.0);
        window.push(at(3), 30.0, 31.0);
        let oldest = window.oldest().cloned().unwrap();

        window.push(at(4), 40.0, 41.0);

        assert_eq!(window.len(), 3);
        assert!(!window.points().any(|p| *p == oldest));
        assert_eq!(window.latest().map(|p| p.current), Some(40.0));
        assert_eq!(window.current(), vec![20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_labels_use_wall_clock_time() {
        let mut window = TimeSeriesWindow::default();
        window.push(Local.with_ymd_and_hms(2024, 5, 1, 14, 3, 27).unwrap(), 1.0, 2.0);
        assert_eq!(window.labels(), vec!["14:03:27".to_string()]);
    }

    #[test]
    fn test_chart_series_indexes_points() {
        let mut window = TimeSeriesWindow::default();
        window.push(at(1), 40.0, 42.0);
        window.push(at(2), 55.2, 50.0);

        let (current, predicted) = window.chart_series();
        assert_eq!(current, vec![(0.0, 40.0), (1.0, 55.2)]);
        assert_eq!(predicted, vec![(0.0, 42.0), (1.0, 50.0)]);
    }
}
