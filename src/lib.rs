pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod history;
pub mod logger;
pub mod poller;
pub mod status;
pub mod tui;

pub use app::App;
pub use config::Config;
pub use dashboard::{Dashboard, DashboardState};
pub use error::{Error, FetchError, Result};
