//! Core types and definitions for terracut.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geographic values, input events, session events, constants and errors.
//! It has no dependency on a rendering engine or async runtime.

pub mod commands;
pub mod constants;
pub mod error;
pub mod events;
pub mod projection;
pub mod types;

pub use error::{Error, Result};
pub use projection::ScreenProjection;
