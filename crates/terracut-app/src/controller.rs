//! View controller: the single owner of the live selection session.
//!
//! Input events are handled synchronously in arrival order. A commit hands
//! the rectangle to the export pipeline on the tokio runtime, so selection
//! keeps responding while terrain is fetched. At most one export runs at a
//! time; a second request while one is pending is rejected.
//!
//! Notices for the user (missing selection, failed export, finished export)
//! arrive over an mpsc channel and are drained with `take_notices`.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use terracut_core::commands::InputEvent;
use terracut_core::constants::NO_SELECTION_MESSAGE;
use terracut_core::events::{Notice, SessionEvent};
use terracut_core::types::GeoRectangle;
use terracut_core::{Error, Result, ScreenProjection};
use terracut_selection::{RectangleOverlay, SelectionSession};

use crate::config::KeyBindings;
use crate::pipeline::{ExportPipeline, ExportReport};

pub struct ViewController<P, O> {
    session: SelectionSession,
    projection: P,
    overlay: O,
    keys: KeyBindings,
    pipeline: Arc<ExportPipeline>,
    runtime: Handle,
    in_flight: Option<JoinHandle<Result<ExportReport>>>,
    notice_tx: mpsc::UnboundedSender<Notice>,
    notice_rx: mpsc::UnboundedReceiver<Notice>,
}

impl<P, O> ViewController<P, O>
where
    P: ScreenProjection,
    O: RectangleOverlay,
{
    /// Must be called from within a tokio runtime.
    pub fn new(
        projection: P,
        overlay: O,
        keys: KeyBindings,
        pipeline: Arc<ExportPipeline>,
    ) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| Error::internal(format!("no async runtime: {e}")))?;
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        Ok(Self {
            session: SelectionSession::new(),
            projection,
            overlay,
            keys,
            pipeline,
            runtime,
            in_flight: None,
            notice_tx,
            notice_rx,
        })
    }

    pub fn session(&self) -> &SelectionSession {
        &self.session
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// True while the last export has not finished.
    pub fn export_in_flight(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Apply one input event.
    pub fn handle_input(&mut self, event: &InputEvent) {
        let resolved;
        let event = match event {
            InputEvent::Key { key } => {
                debug!(key = %key, "Key pressed");
                match self.keys.resolve(key) {
                    Some(command) => {
                        resolved = command;
                        &resolved
                    }
                    None => return,
                }
            }
            other => other,
        };

        match self.session.handle_event(event, &self.projection) {
            Ok(effects) => {
                self.overlay.apply(&effects);
                for effect in effects {
                    if let SessionEvent::Committed { rectangle } = effect {
                        self.commit(rectangle);
                    }
                }
            }
            Err(Error::ProjectionFailed) => {
                debug!(?event, "Pointer not over the globe, event dropped");
            }
            Err(Error::NoActiveSelection) => {
                warn!("Export requested without a selection");
                self.notify(Notice::warning(NO_SELECTION_MESSAGE));
            }
            Err(e) => {
                error!(error = %e, "Selection event failed");
                self.notify(Notice::error(e.to_string()));
            }
        }
    }

    fn commit(&mut self, rectangle: GeoRectangle) {
        if let Err(e) = self.start_export(rectangle) {
            warn!(error = %e, "Export rejected");
            self.notify(Notice::warning(e.to_string()));
        }
    }

    fn start_export(&mut self, rectangle: GeoRectangle) -> Result<()> {
        if self.export_in_flight() {
            return Err(Error::ExportInProgress);
        }

        let pipeline = Arc::clone(&self.pipeline);
        let notices = self.notice_tx.clone();
        let handle = self.runtime.spawn(async move {
            let outcome = pipeline.run(rectangle).await;
            // Receiver lives as long as the controller; a closed channel only means shutdown
            let _ = notices.send(outcome_notice(&outcome));
            outcome
        });
        self.in_flight = Some(handle);
        Ok(())
    }

    /// Wait for the outstanding export, if any.
    pub async fn wait_for_export(&mut self) -> Option<Result<ExportReport>> {
        let handle = self.in_flight.take()?;
        Some(
            handle
                .await
                .map_err(|e| Error::internal(format!("export task failed: {e}")))
                .and_then(|outcome| outcome),
        )
    }

    /// Drain pending notices in the order they were raised.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(notice) = self.notice_rx.try_recv() {
            notices.push(notice);
        }
        notices
    }

    fn notify(&self, notice: Notice) {
        let _ = self.notice_tx.send(notice);
    }
}

/// Log an export outcome and turn it into a user notice.
fn outcome_notice(outcome: &Result<ExportReport>) -> Notice {
    match outcome {
        Ok(report) => {
            info!(
                files = report.files.len(),
                vertices = report.vertex_count,
                faces = report.face_count,
                unresolved = report.unresolved,
                "Export finished"
            );
            let names: Vec<String> = report
                .files
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            Notice::info(format!("Exported {}", names.join(", ")))
        }
        Err(e) => {
            error!(error = %e, "Error sampling terrain");
            Notice::error(format!("Export failed: {e}"))
        }
    }
}
