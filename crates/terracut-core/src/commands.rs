//! Input events delivered by the host environment to the view controller.
//!
//! Events are handled strictly in arrival order.

use serde::{Deserialize, Serialize};

/// All input the interactive view reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    // --- Pointer ---
    /// Primary button pressed.
    PointerDown { x: f64, y: f64 },
    /// Pointer moved (button state irrelevant).
    PointerMove { x: f64, y: f64 },
    /// Primary button released.
    PointerUp { x: f64, y: f64 },

    // --- Commands ---
    /// Toggle selection mode. Turning it off commits the current rectangle.
    ToggleSelectionMode,
    /// Export the current selection without leaving selection mode.
    ExportSelection,
    /// Raw key press, resolved through the configured key bindings.
    Key { key: String },
}
