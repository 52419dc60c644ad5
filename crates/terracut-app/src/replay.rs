//! Replay of recorded input events through a view controller.
//!
//! Recordings are newline-delimited JSON, one `InputEvent` per line. Blank
//! lines and lines starting with `#` are skipped.

use tracing::{error, info, warn};

use terracut_core::commands::InputEvent;
use terracut_core::events::{Notice, NoticeLevel};
use terracut_core::{Result, ScreenProjection};
use terracut_selection::RectangleOverlay;

use crate::controller::ViewController;
use crate::pipeline::ExportReport;

/// Parse a recording. Malformed lines are logged and skipped.
pub fn parse_events(text: &str) -> Vec<InputEvent> {
    let mut events = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(event) => events.push(event),
            Err(e) => warn!(line = line_no + 1, error = %e, "Skipping malformed event"),
        }
    }
    events
}

/// Log user notices at their own level.
pub fn log_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice.level {
            NoticeLevel::Info => info!("{}", notice.message),
            NoticeLevel::Warning => warn!("{}", notice.message),
            NoticeLevel::Error => error!("{}", notice.message),
        }
    }
}

/// Feed `events` in order, then wait for the export still running, if any.
///
/// Returns the report of that last export.
pub async fn replay<P, O>(
    controller: &mut ViewController<P, O>,
    events: &[InputEvent],
) -> Result<Option<ExportReport>>
where
    P: ScreenProjection,
    O: RectangleOverlay,
{
    for event in events {
        controller.handle_input(event);
        // Let a running export make progress between events
        tokio::task::yield_now().await;
        log_notices(controller.take_notices());
    }
    info!(events = events.len(), "Replay finished");

    match controller.wait_for_export().await {
        Some(outcome) => {
            log_notices(controller.take_notices());
            outcome.map(Some)
        }
        None => Ok(None),
    }
}
