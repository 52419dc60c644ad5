//! Displayed selection rectangle.

use tracing::debug;

use terracut_core::events::SessionEvent;
use terracut_core::types::GeoRectangle;

/// Create-or-mutate primitive for the one rectangle shown on the globe.
pub trait RectangleOverlay {
    fn upsert(&mut self, rectangle: &GeoRectangle);

    /// Forward every overlay change in `events`.
    fn apply(&mut self, events: &[SessionEvent]) {
        for event in events {
            if let SessionEvent::OverlayChanged { rectangle } = event {
                self.upsert(rectangle);
            }
        }
    }
}

/// Headless overlay that keeps the single rectangle entity in memory.
#[derive(Debug, Clone, Default)]
pub struct TrackedOverlay {
    rectangle: Option<GeoRectangle>,
    revision: u64,
}

impl TrackedOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rectangle(&self) -> Option<GeoRectangle> {
        self.rectangle
    }

    /// Number of upserts applied; 0 means the entity was never created.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl RectangleOverlay for TrackedOverlay {
    fn upsert(&mut self, rectangle: &GeoRectangle) {
        match self.rectangle.replace(*rectangle) {
            None => debug!(?rectangle, "Rectangle created"),
            Some(_) => debug!(?rectangle, "Rectangle updated"),
        }
        self.revision += 1;
    }
}
