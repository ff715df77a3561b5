//! REST API controllers.

pub mod health_controller;
pub mod listing_controller;
pub mod metrics_controller;

pub use health_controller::*;
