//! Terrain query adapters and batch sampling.
//!
//! `TerrainQuery` resolves heights for a batch of points asynchronously.
//! `sample_terrain` runs one batch for a whole lattice and checks the result
//! lines up 1:1 with the request before anything downstream sees it.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use terracut_core::constants::COORD_MATCH_TOLERANCE;
use terracut_core::types::{GeoCoord, SampledPoint};
use terracut_core::{Error, Result};

use crate::heightmap::Heightmap;
use crate::hgt::load_hgt;
use crate::sample_grid::SampleGrid;

/// Batch elevation lookup.
///
/// Implementations must return exactly one `SampledPoint` per input point,
/// in input order. A failure fails the whole batch.
#[async_trait]
pub trait TerrainQuery: Send + Sync {
    async fn sample_heights(&self, points: &[GeoCoord]) -> Result<Vec<SampledPoint>>;
}

/// Bare reference surface: every point resolves to height 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct EllipsoidTerrain;

#[async_trait]
impl TerrainQuery for EllipsoidTerrain {
    async fn sample_heights(&self, points: &[GeoCoord]) -> Result<Vec<SampledPoint>> {
        Ok(points
            .iter()
            .map(|p| SampledPoint::new(*p, Some(0.0)))
            .collect())
    }
}

/// Local heightmap tiles, finest resolution first.
#[derive(Debug, Clone, Default)]
pub struct TileSetTerrain {
    tiles: Vec<Heightmap>,
}

impl TileSetTerrain {
    pub fn new(mut tiles: Vec<Heightmap>) -> Self {
        tiles.sort_by(|a, b| a.header().cell_size.total_cmp(&b.header().cell_size));
        Self { tiles }
    }

    /// Load every HGT tile in `paths`.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut tiles = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let tile = load_hgt(path)?;
            info!(
                path = %path.display(),
                size = tile.header().width,
                min = tile.header().min_elevation,
                max = tile.header().max_elevation,
                "Loaded terrain tile"
            );
            tiles.push(tile);
        }
        Ok(Self::new(tiles))
    }

    pub fn tiles(&self) -> &[Heightmap] {
        &self.tiles
    }

    /// Height from the finest tile covering `coord`.
    pub fn height_at(&self, coord: &GeoCoord) -> Option<f64> {
        self.tiles.iter().find_map(|tile| tile.elevation_at(coord))
    }
}

#[async_trait]
impl TerrainQuery for TileSetTerrain {
    async fn sample_heights(&self, points: &[GeoCoord]) -> Result<Vec<SampledPoint>> {
        Ok(points
            .iter()
            .map(|p| SampledPoint::new(*p, self.height_at(p)))
            .collect())
    }
}

/// Sample every lattice point in one batch.
///
/// Any adapter error, a short or long result, or a result whose points do
/// not match the request index-for-index fails with `TerrainQueryFailed`.
pub async fn sample_terrain(
    query: &dyn TerrainQuery,
    grid: &SampleGrid,
) -> Result<Vec<SampledPoint>> {
    let points: Vec<GeoCoord> = grid.points().collect();
    debug!(points = points.len(), "Sampling terrain");

    let sampled = query.sample_heights(&points).await.map_err(|e| match e {
        Error::TerrainQueryFailed(_) => e,
        other => Error::terrain_query(other.to_string()),
    })?;

    if sampled.len() != points.len() {
        return Err(Error::terrain_query(format!(
            "expected {} samples, got {}",
            points.len(),
            sampled.len()
        )));
    }

    if let Some(index) = points.iter().zip(&sampled).position(|(p, s)| {
        (p.longitude - s.longitude).abs() > COORD_MATCH_TOLERANCE
            || (p.latitude - s.latitude).abs() > COORD_MATCH_TOLERANCE
    }) {
        return Err(Error::terrain_query(format!(
            "sample {index} does not match the requested point"
        )));
    }

    let heights = sampled.iter().filter_map(|s| s.height);
    let (min, max) = heights.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), h| {
        (lo.min(h), hi.max(h))
    });
    let unresolved = sampled.iter().filter(|s| s.height.is_none()).count();
    info!(count = sampled.len(), min, max, unresolved, "Sampled terrain heights");
    if unresolved > 0 {
        warn!(unresolved, "Some points have no terrain coverage");
    }

    Ok(sampled)
}
