//! Rectangle selection for terracut.
//!
//! Drag-selection state machine over a globe surface and the overlay seam
//! used to display the live rectangle.

pub use terracut_core as core;

pub mod overlay;
pub mod session;

pub use overlay::{RectangleOverlay, TrackedOverlay};
pub use session::{Phase, SelectionSession};

#[cfg(test)]
mod tests;
