//! Which artifacts an export produces.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Wavefront OBJ mesh.
    #[default]
    Mesh,
    /// JSON elevation record.
    Record,
    /// Both, from the same sample batch.
    Both,
}

impl ExportFormat {
    pub fn includes_mesh(self) -> bool {
        matches!(self, Self::Mesh | Self::Both)
    }

    pub fn includes_record(self) -> bool {
        matches!(self, Self::Record | Self::Both)
    }
}
