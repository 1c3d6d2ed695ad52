pub mod alerts;
pub mod config;
pub mod constants;
pub mod helpers;
pub mod interfaces;
pub mod pipeline;
pub mod server;

pub use config::{Config, ConfigError};
pub use pipeline::{run, run_with, Delivery, RunError, RunOutcome};
