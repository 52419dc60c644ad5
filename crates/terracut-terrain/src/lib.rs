//! Terrain side of terracut.
//!
//! Screen-to-globe projection, sample lattices, heightmap tiles
//! and batch elevation queries.

pub use terracut_core as core;

pub mod heightmap;
pub mod hgt;
pub mod projection;
pub mod query;
pub mod sample_grid;

// Re-export key types for convenience.
pub use heightmap::{Heightmap, HeightmapHeader};
pub use projection::GlobeCamera;
pub use query::{sample_terrain, EllipsoidTerrain, TerrainQuery, TileSetTerrain};
pub use sample_grid::{build_grid, SampleGrid};
