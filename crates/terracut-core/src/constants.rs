//! Defaults and reference-surface constants.

/// Default sample lattice width.
pub const DEFAULT_GRID_COLUMNS: usize = 50;

/// Default sample lattice height.
pub const DEFAULT_GRID_ROWS: usize = 50;

/// Smallest lattice dimension that still produces triangles.
pub const MIN_GRID_DIMENSION: usize = 2;

/// WGS84 semi-major axis (meters).
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 semi-minor axis (meters).
pub const WGS84_SEMI_MINOR_AXIS: f64 = 6_356_752.314_245_179;

/// Default OBJ group name and file prefix.
pub const DEFAULT_EXPORT_NAME: &str = "terrain";

/// Notice shown when an export is requested without a selection.
pub const NO_SELECTION_MESSAGE: &str = "Please select an area first.";

/// Coordinate tolerance when matching terrain results to requested points (degrees).
pub const COORD_MATCH_TOLERANCE: f64 = 1e-9;
