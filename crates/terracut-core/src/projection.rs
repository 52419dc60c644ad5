//! Screen-to-geographic projection seam.
//!
//! The rendering engine owns the camera; consumers only need this one query.

use crate::types::{GeoCoord, ScreenPoint};

/// Maps a screen point onto the reference surface.
pub trait ScreenProjection {
    /// Geographic coordinate under `point`, or `None` when the pointer is off the globe.
    fn screen_to_geo(&self, point: ScreenPoint) -> Option<GeoCoord>;
}

impl<F> ScreenProjection for F
where
    F: Fn(ScreenPoint) -> Option<GeoCoord>,
{
    fn screen_to_geo(&self, point: ScreenPoint) -> Option<GeoCoord> {
        self(point)
    }
}
