//! Output side of terracut.
//!
//! Turns sampled lattices into OBJ meshes or JSON elevation records and
//! writes them out under collision-free, timestamped names.

pub use terracut_core as core;

pub mod format;
pub mod mesh;
pub mod record;
pub mod sink;

pub use format::ExportFormat;
pub use mesh::{build_mesh, MeshArtifact};
pub use record::{build_record, ElevationRecord};
pub use sink::{export_filename, DirectorySink, ExportSink, MemorySink};
