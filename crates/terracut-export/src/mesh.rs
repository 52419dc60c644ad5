//! Triangulated surface built from a sampled lattice.
//!
//! Vertices map `(lon, height, lat)` so height is the vertical axis.
//! Each lattice cell becomes two triangles using the same diagonal
//! everywhere, so output is reproducible for identical input.

use std::fmt::Write as _;

use tracing::warn;

use terracut_core::constants::MIN_GRID_DIMENSION;
use terracut_core::types::SampledPoint;
use terracut_core::{Error, Result};

/// Vertex and face lists. Face indices are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshArtifact {
    vertices: Vec<[f64; 3]>,
    faces: Vec<[usize; 3]>,
}

impl MeshArtifact {
    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Render as Wavefront OBJ text under one named group.
    pub fn to_obj(&self, group: &str) -> String {
        let mut obj = String::with_capacity(16 + self.vertices.len() * 48 + self.faces.len() * 24);
        let _ = writeln!(obj, "g {group}");
        for [x, y, z] in &self.vertices {
            let _ = writeln!(obj, "v {x} {y} {z}");
        }
        for [a, b, c] in &self.faces {
            let _ = writeln!(obj, "f {a} {b} {c}");
        }
        obj
    }
}

/// Build a mesh from `columns x rows` row-major samples.
///
/// Unresolved heights are written at sea level.
pub fn build_mesh(points: &[SampledPoint], columns: usize, rows: usize) -> Result<MeshArtifact> {
    if columns < MIN_GRID_DIMENSION || rows < MIN_GRID_DIMENSION {
        return Err(Error::InvalidGridDimensions { columns, rows });
    }
    let expected = columns * rows;
    if points.len() != expected {
        return Err(Error::PointCountMismatch {
            expected,
            actual: points.len(),
        });
    }

    let mut unresolved = 0usize;
    let vertices: Vec<[f64; 3]> = points
        .iter()
        .map(|p| {
            let height = p.height.unwrap_or_else(|| {
                unresolved += 1;
                0.0
            });
            [p.longitude, height, p.latitude]
        })
        .collect();
    if unresolved > 0 {
        warn!(unresolved, "Unresolved heights written at sea level");
    }

    let mut faces = Vec::with_capacity(2 * (columns - 1) * (rows - 1));
    for row in 0..rows - 1 {
        for col in 0..columns - 1 {
            let i1 = row * columns + col + 1;
            let i2 = i1 + 1;
            let i3 = i1 + columns;
            let i4 = i3 + 1;
            faces.push([i1, i2, i3]);
            faces.push([i2, i3, i4]);
        }
    }

    Ok(MeshArtifact { vertices, faces })
}

#[cfg(test)]
mod tests {
    use super::*;
    use terracut_core::types::GeoCoord;

    fn lattice(columns: usize, rows: usize) -> Vec<SampledPoint> {
        (0..rows)
            .flat_map(|r| {
                (0..columns).map(move |c| {
                    SampledPoint::new(GeoCoord::new(c as f64, r as f64), Some((r * 10 + c) as f64))
                })
            })
            .collect()
    }

    #[test]
    fn test_topology_counts_50x50() {
        let mesh = build_mesh(&lattice(50, 50), 50, 50).unwrap();
        assert_eq!(mesh.vertex_count(), 2500);
        assert_eq!(mesh.face_count(), 2 * 49 * 49);
        assert!(mesh
            .faces()
            .iter()
            .flatten()
            .all(|&i| (1..=2500).contains(&i)));
    }

    #[test]
    fn test_first_cell_faces() {
        let mesh = build_mesh(&lattice(3, 2), 3, 2).unwrap();
        assert_eq!(mesh.faces()[0], [1, 2, 4]);
        assert_eq!(mesh.faces()[1], [2, 4, 5]);
        assert_eq!(mesh.faces()[2], [2, 3, 5]);
        assert_eq!(mesh.faces()[3], [3, 5, 6]);
        assert_eq!(mesh.face_count(), 4);
    }

    #[test]
    fn test_vertex_axis_order() {
        let points = vec![
            SampledPoint::new(GeoCoord::new(56.25, 26.5), Some(812.5)),
            SampledPoint::new(GeoCoord::new(56.5, 26.5), None),
            SampledPoint::new(GeoCoord::new(56.25, 26.75), Some(-3.0)),
            SampledPoint::new(GeoCoord::new(56.5, 26.75), Some(4.0)),
        ];
        let mesh = build_mesh(&points, 2, 2).unwrap();
        assert_eq!(mesh.vertices()[0], [56.25, 812.5, 26.5]);
        assert_eq!(mesh.vertices()[1], [56.5, 0.0, 26.5], "unresolved at sea level");
    }

    #[test]
    fn test_obj_text() {
        let points = vec![
            SampledPoint::new(GeoCoord::new(10.0, 20.0), Some(1.5)),
            SampledPoint::new(GeoCoord::new(12.0, 20.0), Some(2.0)),
            SampledPoint::new(GeoCoord::new(10.0, 24.0), Some(0.0)),
            SampledPoint::new(GeoCoord::new(12.0, 24.0), Some(-1.25)),
        ];
        let obj = build_mesh(&points, 2, 2).unwrap().to_obj("terrain");
        let expected = "g terrain\n\
                        v 10 1.5 20\n\
                        v 12 2 20\n\
                        v 10 0 24\n\
                        v 12 -1.25 24\n\
                        f 1 2 3\n\
                        f 2 3 4\n";
        assert_eq!(obj, expected);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            build_mesh(&lattice(1, 5), 1, 5),
            Err(Error::InvalidGridDimensions { .. })
        ));
        assert!(matches!(
            build_mesh(&lattice(3, 3), 3, 4),
            Err(Error::PointCountMismatch { expected: 12, actual: 9 })
        ));
    }

    #[test]
    fn test_degenerate_grid_keeps_topology() {
        let points: Vec<SampledPoint> = (0..6)
            .map(|_| SampledPoint::new(GeoCoord::new(5.0, 5.0), Some(0.0)))
            .collect();
        let mesh = build_mesh(&points, 3, 2).unwrap();
        assert_eq!(mesh.face_count(), 4);
    }
}
