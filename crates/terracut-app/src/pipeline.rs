//! Export pipeline: committed rectangle → lattice → terrain → artifacts → sink.
//!
//! One call to `run` performs exactly one terrain batch. Nothing is written
//! unless every requested artifact was built, and a failed write removes the
//! files already written for that export.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use terracut_core::types::GeoRectangle;
use terracut_core::Result;
use terracut_export::{build_mesh, build_record, export_filename, ExportFormat, ExportSink};
use terracut_terrain::{build_grid, sample_terrain, TerrainQuery};

/// Grid and output shape for an export.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub columns: usize,
    pub rows: usize,
    pub format: ExportFormat,
    pub file_prefix: String,
    pub group_name: String,
}

/// What one successful export produced.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub rectangle: GeoRectangle,
    /// Written files, mesh first.
    pub files: Vec<PathBuf>,
    pub vertex_count: Option<usize>,
    pub face_count: Option<usize>,
    /// Lattice points no terrain source resolved.
    pub unresolved: usize,
}

/// Shared by the controller and one-shot exports.
pub struct ExportPipeline {
    terrain: Arc<dyn TerrainQuery>,
    sink: Arc<dyn ExportSink>,
    settings: ExportSettings,
}

impl ExportPipeline {
    pub fn new(
        terrain: Arc<dyn TerrainQuery>,
        sink: Arc<dyn ExportSink>,
        settings: ExportSettings,
    ) -> Self {
        Self {
            terrain,
            sink,
            settings,
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Sample the rectangle and write the configured artifacts.
    pub async fn run(&self, rectangle: GeoRectangle) -> Result<ExportReport> {
        let s = &self.settings;
        info!(
            lon_min = rectangle.west(),
            lat_min = rectangle.south(),
            lon_max = rectangle.east(),
            lat_max = rectangle.north(),
            "Selected area"
        );

        let grid = build_grid(rectangle, s.columns, s.rows)?;
        let sampled = sample_terrain(self.terrain.as_ref(), &grid).await?;
        let unresolved = sampled.iter().filter(|p| p.height.is_none()).count();
        let timestamp = Utc::now();

        let mut outputs: Vec<(String, Vec<u8>)> = Vec::new();
        let mut vertex_count = None;
        let mut face_count = None;

        if s.format.includes_mesh() {
            let mesh = build_mesh(&sampled, grid.columns(), grid.rows())?;
            vertex_count = Some(mesh.vertex_count());
            face_count = Some(mesh.face_count());
            outputs.push((
                export_filename(&s.file_prefix, &timestamp, "obj"),
                mesh.to_obj(&s.group_name).into_bytes(),
            ));
        }

        if s.format.includes_record() {
            let record = build_record(&rectangle, &sampled, timestamp);
            outputs.push((
                export_filename(&s.file_prefix, &timestamp, "json"),
                record.to_json()?.into_bytes(),
            ));
        }

        let mut files = Vec::with_capacity(outputs.len());
        for (name, content) in outputs {
            match self.sink.export(&name, &content) {
                Ok(path) => files.push(path),
                Err(e) => {
                    self.discard_all(&files);
                    return Err(e);
                }
            }
        }

        Ok(ExportReport {
            rectangle,
            files,
            vertex_count,
            face_count,
            unresolved,
        })
    }

    fn discard_all(&self, written: &[PathBuf]) {
        for path in written {
            match self.sink.discard(path) {
                Ok(()) => warn!(path = %path.display(), "Removed file from incomplete export"),
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not remove file from incomplete export"
                ),
            }
        }
    }
}
