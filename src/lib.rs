//! Client side of the sensor dashboard: log in, fetch sensor readings,
//! filter them by a time window and turn them into a dual-axis chart.
//!
//! This module is the single gateway for the crate (EMBP). Sibling modules
//! only know about each other through the paths re-exported here.

pub mod chart;
pub mod config;
pub mod effects;
pub mod error;
pub mod filter;
pub mod models;
pub mod navigation;
pub mod screens;
pub mod sensors;
pub mod session;

pub use chart::{ChartConfig, ChartData, ChartSeries, ChartVariant};
pub use config::Config;
pub use error::{AuthError, FetchError};
pub use filter::{filter_by_range, TimeRange};
pub use models::{Credentials, SensorReading, SessionToken};
pub use navigation::Route;
pub use sensors::{ReadingsSource, SensorClient};
pub use session::SessionClient;
