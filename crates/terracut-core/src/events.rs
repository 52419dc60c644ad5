//! Events emitted by the selection session and notices for the user.

use serde::{Deserialize, Serialize};

use crate::types::GeoRectangle;

/// Side effects produced by a selection transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// The displayed rectangle must be created or mutated to these bounds.
    OverlayChanged { rectangle: GeoRectangle },
    /// The rectangle was committed for export.
    Committed { rectangle: GeoRectangle },
}

/// Severity of a user notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Message surfaced to the user (blocking dialog in a GUI host, log line headless).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}
