//! terracut application.
//!
//! Wires selection, terrain and export together: the view controller that
//! owns the live selection session, the async export pipeline, configuration
//! and logging setup for the `terracut` binary.

pub mod config;
pub mod controller;
pub mod logging;
pub mod pipeline;
pub mod replay;

pub use terracut_core as core;

pub use config::AppConfig;
pub use controller::ViewController;
pub use pipeline::{ExportPipeline, ExportReport, ExportSettings};
