//! HTTP API handlers

pub mod disease;
pub mod health;
pub mod soil;
pub mod ui;
pub mod weather;

pub use disease::assess_disease;
pub use health::health_check;
pub use soil::analyze_soil;
pub use ui::serve_index;
pub use weather::get_forecast;
