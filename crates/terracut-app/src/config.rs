//! Application configuration loaded from TOML.
//!
//! Every section is optional; missing values fall back to defaults.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use terracut_core::commands::InputEvent;
use terracut_core::constants::{
    DEFAULT_EXPORT_NAME, DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS, MIN_GRID_DIMENSION,
};
use terracut_core::{Error, Result};
use terracut_export::{DirectorySink, ExportFormat};
use terracut_terrain::{EllipsoidTerrain, GlobeCamera, TerrainQuery, TileSetTerrain};

use crate::pipeline::{ExportPipeline, ExportSettings};

/// Sample lattice dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            rows: DEFAULT_GRID_ROWS,
        }
    }
}

/// Output location and shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub format: ExportFormat,
    pub file_prefix: String,
    /// OBJ group header name.
    pub group_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
            format: ExportFormat::default(),
            file_prefix: DEFAULT_EXPORT_NAME.to_string(),
            group_name: DEFAULT_EXPORT_NAME.to_string(),
        }
    }
}

/// Local terrain tiles. Empty means the bare ellipsoid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub tiles: Vec<PathBuf>,
}

/// Headless globe camera used for screen→geo projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude_m: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub fov_y_degrees: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            altitude_m: 20_000_000.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            fov_y_degrees: 60.0,
        }
    }
}

/// Keys for the two abstract commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub toggle: String,
    pub export: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle: "y".to_string(),
            export: "p".to_string(),
        }
    }
}

impl KeyBindings {
    /// Command bound to `key`, if any.
    pub fn resolve(&self, key: &str) -> Option<InputEvent> {
        if key == self.toggle {
            Some(InputEvent::ToggleSelectionMode)
        } else if key == self.export {
            Some(InputEvent::ExportSelection)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub grid: GridConfig,
    pub export: ExportConfig,
    pub terrain: TerrainConfig,
    pub camera: CameraConfig,
    pub keys: KeyBindings,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Read and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(text).map_err(|e| Error::config(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let GridConfig { columns, rows } = self.grid;
        if columns < MIN_GRID_DIMENSION || rows < MIN_GRID_DIMENSION {
            return Err(Error::config(format!(
                "grid must be at least {MIN_GRID_DIMENSION}x{MIN_GRID_DIMENSION}, got {columns}x{rows}"
            )));
        }
        let cam = &self.camera;
        if cam.viewport_width <= 0.0 || cam.viewport_height <= 0.0 {
            return Err(Error::config("viewport dimensions must be positive"));
        }
        if !(cam.fov_y_degrees > 0.0 && cam.fov_y_degrees < 180.0) {
            return Err(Error::config("fov_y_degrees must be in (0, 180)"));
        }
        if self.keys.toggle == self.keys.export {
            return Err(Error::config("toggle and export keys must differ"));
        }
        Ok(())
    }

    pub fn camera(&self) -> GlobeCamera {
        let c = &self.camera;
        GlobeCamera::looking_down(
            c.longitude,
            c.latitude,
            c.altitude_m,
            c.viewport_width,
            c.viewport_height,
            c.fov_y_degrees,
        )
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            columns: self.grid.columns,
            rows: self.grid.rows,
            format: self.export.format,
            file_prefix: self.export.file_prefix.clone(),
            group_name: self.export.group_name.clone(),
        }
    }

    /// Terrain source and output directory wired into one pipeline.
    pub fn pipeline(&self) -> Result<ExportPipeline> {
        let terrain: Arc<dyn TerrainQuery> = if self.terrain.tiles.is_empty() {
            warn!("No terrain tiles configured, sampling the bare ellipsoid");
            Arc::new(EllipsoidTerrain)
        } else {
            let tiles = TileSetTerrain::load(&self.terrain.tiles)?;
            info!(tiles = tiles.tiles().len(), "Terrain ready");
            Arc::new(tiles)
        };
        let sink = DirectorySink::new(self.export.output_dir.clone());
        info!(dir = %sink.dir().display(), format = ?self.export.format, "Export sink ready");
        Ok(ExportPipeline::new(
            terrain,
            Arc::new(sink),
            self.export_settings(),
        ))
    }
}
