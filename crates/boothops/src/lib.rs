//! Decision engine for a photo booth rental business.
//!
//! The [`executives`] module holds the rule-based calculations (profit sharing, capacity,
//! scheduling, quality, strategy, and marketing) behind a single dispatcher. Configuration,
//! telemetry, and the application error type are shared with the `boothops-api` service.

pub mod config;
pub mod error;
pub mod executives;
pub mod telemetry;
