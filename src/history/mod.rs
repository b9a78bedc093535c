pub mod buffer;
pub mod export;
pub mod window;

pub use buffer::{CircularBuffer, DataPoint};
pub use export::{export_history, export_to_csv, export_to_json};
pub use window::{ChartPoint, TimeSeriesWindow, WINDOW_CAPACITY};
