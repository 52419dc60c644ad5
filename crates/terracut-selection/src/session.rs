//! Selection state machine.
//!
//! `SelectionSession` is a plain value owned by the view controller.
//! `handle_event` applies one input event and returns the side effects
//! (overlay updates, commits) for the caller to carry out. No rendering
//! dependency: the projection is passed in per call.

use tracing::{debug, info};

use terracut_core::commands::InputEvent;
use terracut_core::events::SessionEvent;
use terracut_core::types::{GeoCoord, GeoRectangle, ScreenPoint};
use terracut_core::{Error, Result, ScreenProjection};

/// Drag-selection lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Selection mode off.
    #[default]
    Idle,
    /// Selection mode on, no drag in progress.
    Armed,
    /// Pointer held down, anchor set.
    Dragging,
}

/// Mutable selection state for one interactive view.
#[derive(Debug, Clone, Default)]
pub struct SelectionSession {
    phase: Phase,
    anchor: Option<GeoCoord>,
    rectangle: Option<GeoRectangle>,
}

impl SelectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Geographic point where the current drag started.
    pub fn anchor(&self) -> Option<GeoCoord> {
        self.anchor
    }

    /// Most recent rectangle, retained across drags until overwritten.
    pub fn rectangle(&self) -> Option<GeoRectangle> {
        self.rectangle
    }

    pub fn is_selecting(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Apply one input event.
    ///
    /// On `Err` the event is dropped and the session is unchanged, except that
    /// toggling off with no rectangle still returns to `Idle` before reporting
    /// `NoActiveSelection`.
    /// `Key` events are ignored here; the controller resolves bindings first.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        projection: &dyn ScreenProjection,
    ) -> Result<Vec<SessionEvent>> {
        match *event {
            InputEvent::ToggleSelectionMode => self.toggle(),
            InputEvent::ExportSelection => self.commit().map(|event| vec![event]),
            InputEvent::PointerDown { x, y } => {
                self.pointer_down(ScreenPoint::new(x, y), projection)?;
                Ok(Vec::new())
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer_move(ScreenPoint::new(x, y), projection)
            }
            InputEvent::PointerUp { .. } => {
                self.pointer_up();
                Ok(Vec::new())
            }
            InputEvent::Key { .. } => Ok(Vec::new()),
        }
    }

    /// Commit the current rectangle without changing phase.
    pub fn commit(&self) -> Result<SessionEvent> {
        self.rectangle
            .map(|rectangle| SessionEvent::Committed { rectangle })
            .ok_or(Error::NoActiveSelection)
    }

    fn toggle(&mut self) -> Result<Vec<SessionEvent>> {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Armed;
                info!("Selection mode ON");
                Ok(Vec::new())
            }
            Phase::Armed | Phase::Dragging => {
                // Leaving mid-drag finalizes whatever the drag produced so far
                self.phase = Phase::Idle;
                self.anchor = None;
                info!("Selection mode OFF");
                match self.rectangle {
                    Some(rectangle) => Ok(vec![SessionEvent::Committed { rectangle }]),
                    None => {
                        debug!("No rectangle to commit");
                        Err(Error::NoActiveSelection)
                    }
                }
            }
        }
    }

    fn pointer_down(&mut self, point: ScreenPoint, projection: &dyn ScreenProjection) -> Result<()> {
        if self.phase != Phase::Armed || self.anchor.is_some() {
            return Ok(());
        }
        let anchor = projection
            .screen_to_geo(point)
            .ok_or(Error::ProjectionFailed)?;
        self.anchor = Some(anchor);
        self.phase = Phase::Dragging;
        info!(
            lon = anchor.longitude,
            lat = anchor.latitude,
            "Selection started"
        );
        Ok(())
    }

    fn pointer_move(
        &mut self,
        point: ScreenPoint,
        projection: &dyn ScreenProjection,
    ) -> Result<Vec<SessionEvent>> {
        let anchor = match (self.phase, self.anchor) {
            (Phase::Dragging, Some(anchor)) => anchor,
            _ => return Ok(Vec::new()),
        };
        let current = projection
            .screen_to_geo(point)
            .ok_or(Error::ProjectionFailed)?;
        let rectangle = GeoRectangle::from_corners(anchor, current);
        self.rectangle = Some(rectangle);
        Ok(vec![SessionEvent::OverlayChanged { rectangle }])
    }

    fn pointer_up(&mut self) {
        if self.phase != Phase::Dragging {
            return;
        }
        self.phase = Phase::Armed;
        self.anchor = None;
        info!("Selection ended");
    }
}
