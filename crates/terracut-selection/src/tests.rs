#[cfg(test)]
mod tests {
    use terracut_core::commands::InputEvent;
    use terracut_core::events::SessionEvent;
    use terracut_core::types::{GeoCoord, GeoRectangle, ScreenPoint};
    use terracut_core::Error;

    use crate::overlay::{RectangleOverlay, TrackedOverlay};
    use crate::session::{Phase, SelectionSession};

    /// Flat test projection: 10 px per degree, y grows south. Negative x is off-globe.
    fn flat(point: ScreenPoint) -> Option<GeoCoord> {
        if point.x < 0.0 {
            return None;
        }
        Some(GeoCoord::new(point.x / 10.0, -point.y / 10.0))
    }

    fn down(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerDown { x, y }
    }

    fn mv(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove { x, y }
    }

    fn up(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerUp { x, y }
    }

    /// Drive a session through events, collecting every emitted effect.
    fn run(session: &mut SelectionSession, events: &[InputEvent]) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        for event in events {
            if let Ok(effects) = session.handle_event(event, &flat) {
                out.extend(effects);
            }
        }
        out
    }

    fn committed(effects: &[SessionEvent]) -> Vec<GeoRectangle> {
        effects
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Committed { rectangle } => Some(*rectangle),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = SelectionSession::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.anchor().is_none());
        assert!(session.rectangle().is_none());
        assert!(!session.is_selecting());
    }

    #[test]
    fn test_toggle_arms_and_disarms() {
        let mut session = SelectionSession::new();
        let effects = run(&mut session, &[InputEvent::ToggleSelectionMode]);
        assert!(effects.is_empty());
        assert_eq!(session.phase(), Phase::Armed);

        let result = session.handle_event(&InputEvent::ToggleSelectionMode, &flat);
        assert!(matches!(result, Err(Error::NoActiveSelection)));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.anchor().is_none());
    }

    #[test]
    fn test_toggle_off_mid_drag_without_rectangle_still_disarms() {
        let mut session = SelectionSession::new();
        run(&mut session, &[InputEvent::ToggleSelectionMode, down(10.0, 10.0)]);
        assert_eq!(session.phase(), Phase::Dragging);

        let result = session.handle_event(&InputEvent::ToggleSelectionMode, &flat);
        assert!(matches!(result, Err(Error::NoActiveSelection)));
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.anchor().is_none());
        assert!(session.rectangle().is_none());
    }

    #[test]
    fn test_pointer_ignored_while_idle() {
        let mut session = SelectionSession::new();
        let effects = run(&mut session, &[down(10.0, 10.0), mv(50.0, 50.0), up(50.0, 50.0)]);
        assert!(effects.is_empty());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.rectangle().is_none());
    }

    #[test]
    fn test_drag_builds_normalized_rectangle() {
        let mut session = SelectionSession::new();
        run(&mut session, &[InputEvent::ToggleSelectionMode, down(120.0, 200.0)]);
        assert_eq!(session.phase(), Phase::Dragging);
        assert_eq!(session.anchor(), Some(GeoCoord::new(12.0, -20.0)));

        // Drag up and to the left of the anchor
        let effects = run(&mut session, &[mv(100.0, 160.0)]);
        let expected = GeoRectangle::from_bounds(10.0, -20.0, 12.0, -16.0);
        assert_eq!(effects, vec![SessionEvent::OverlayChanged { rectangle: expected }]);
        assert_eq!(session.rectangle(), Some(expected));
    }

    #[test]
    fn test_every_move_republishes() {
        let mut session = SelectionSession::new();
        let effects = run(
            &mut session,
            &[
                InputEvent::ToggleSelectionMode,
                down(0.0, 0.0),
                mv(10.0, 10.0),
                mv(20.0, 20.0),
                mv(30.0, 30.0),
            ],
        );
        assert_eq!(effects.len(), 3);
        assert_eq!(
            session.rectangle(),
            Some(GeoRectangle::from_bounds(0.0, -3.0, 3.0, 0.0))
        );
    }

    #[test]
    fn test_pointer_down_off_globe_stays_armed() {
        let mut session = SelectionSession::new();
        run(&mut session, &[InputEvent::ToggleSelectionMode]);
        let result = session.handle_event(&down(-5.0, 10.0), &flat);
        assert!(matches!(result, Err(Error::ProjectionFailed)));
        assert_eq!(session.phase(), Phase::Armed);
        assert!(session.anchor().is_none());
    }

    #[test]
    fn test_move_off_globe_keeps_previous_rectangle() {
        let mut session = SelectionSession::new();
        run(
            &mut session,
            &[InputEvent::ToggleSelectionMode, down(0.0, 0.0), mv(10.0, 10.0)],
        );
        let before = session.rectangle();
        let result = session.handle_event(&mv(-1.0, 40.0), &flat);
        assert!(matches!(result, Err(Error::ProjectionFailed)));
        assert_eq!(session.rectangle(), before);
        assert_eq!(session.phase(), Phase::Dragging);
    }

    #[test]
    fn test_pointer_up_retains_rectangle() {
        let mut session = SelectionSession::new();
        run(
            &mut session,
            &[
                InputEvent::ToggleSelectionMode,
                down(0.0, 0.0),
                mv(20.0, 20.0),
                up(20.0, 20.0),
            ],
        );
        assert_eq!(session.phase(), Phase::Armed);
        assert!(session.anchor().is_none());
        assert_eq!(
            session.rectangle(),
            Some(GeoRectangle::from_bounds(0.0, -2.0, 2.0, 0.0))
        );
    }

    #[test]
    fn test_toggle_off_commits_exactly_once() {
        let mut session = SelectionSession::new();
        run(
            &mut session,
            &[
                InputEvent::ToggleSelectionMode,
                down(0.0, 0.0),
                mv(20.0, 20.0),
                up(20.0, 20.0),
            ],
        );
        let effects = run(&mut session, &[InputEvent::ToggleSelectionMode]);
        assert_eq!(
            committed(&effects),
            vec![GeoRectangle::from_bounds(0.0, -2.0, 2.0, 0.0)]
        );
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_toggle_off_mid_drag_commits() {
        let mut session = SelectionSession::new();
        run(
            &mut session,
            &[InputEvent::ToggleSelectionMode, down(0.0, 0.0), mv(30.0, 10.0)],
        );
        let effects = run(&mut session, &[InputEvent::ToggleSelectionMode]);
        assert_eq!(committed(&effects).len(), 1);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.anchor().is_none());
        assert!(session.rectangle().is_some());
    }

    #[test]
    fn test_export_without_selection_is_rejected() {
        let mut session = SelectionSession::new();
        let result = session.handle_event(&InputEvent::ExportSelection, &flat);
        assert!(matches!(result, Err(Error::NoActiveSelection)));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_export_keeps_phase() {
        let mut session = SelectionSession::new();
        run(
            &mut session,
            &[
                InputEvent::ToggleSelectionMode,
                down(0.0, 0.0),
                mv(10.0, 10.0),
                up(10.0, 10.0),
            ],
        );
        let effects = run(&mut session, &[InputEvent::ExportSelection]);
        assert_eq!(committed(&effects).len(), 1);
        assert_eq!(session.phase(), Phase::Armed);
    }

    #[test]
    fn test_new_drag_overwrites_on_first_move() {
        let mut session = SelectionSession::new();
        run(
            &mut session,
            &[
                InputEvent::ToggleSelectionMode,
                down(0.0, 0.0),
                mv(10.0, 10.0),
                up(10.0, 10.0),
                down(100.0, 100.0),
            ],
        );
        // Pointer-down alone does not clear the previous rectangle
        assert_eq!(
            session.rectangle(),
            Some(GeoRectangle::from_bounds(0.0, -1.0, 1.0, 0.0))
        );
        run(&mut session, &[mv(120.0, 120.0)]);
        assert_eq!(
            session.rectangle(),
            Some(GeoRectangle::from_bounds(10.0, -12.0, 12.0, -10.0))
        );
    }

    #[test]
    fn test_key_events_are_ignored() {
        let mut session = SelectionSession::new();
        let effects = run(&mut session, &[InputEvent::Key { key: "y".into() }]);
        assert!(effects.is_empty());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_tracked_overlay_single_entity() {
        let mut session = SelectionSession::new();
        let mut overlay = TrackedOverlay::new();
        let effects = run(
            &mut session,
            &[
                InputEvent::ToggleSelectionMode,
                down(0.0, 0.0),
                mv(10.0, 10.0),
                mv(40.0, 20.0),
            ],
        );
        overlay.apply(&effects);
        assert_eq!(overlay.revision(), 2);
        assert_eq!(
            overlay.rectangle(),
            Some(GeoRectangle::from_bounds(0.0, -2.0, 4.0, 0.0))
        );
    }
}
