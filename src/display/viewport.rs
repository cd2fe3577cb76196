//! Viewport fitting on a Web-Mercator tile pyramid.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{PreviewError, Result};
use crate::imagery::Geometry;

/// Deepest zoom level a map client serves
pub const MAX_ZOOM: u8 = 24;

/// Zoom used for points and zero-area footprints
pub const POINT_ZOOM: u8 = 16;

/// Tile edge in pixels
const TILE_SIZE: f64 = 256.0;

/// Mercator cuts off here
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Center and zoom of a map display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub lon: f64,
    pub lat: f64,
    pub zoom: u8,
}

fn mercator_y(lat: f64) -> f64 {
    let lat = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    (PI / 4.0 + lat / 2.0).tan().ln()
}

impl Viewport {
    /// Center on a geometry.
    ///
    /// With no explicit zoom, picks the deepest zoom at which the geometry's
    /// bounds fit into a `width` x `height` pixel display.
    pub fn fit(geometry: &Geometry, width: u32, height: u32, zoom: Option<u8>) -> Result<Self> {
        let bounds = geometry
            .bounds()
            .ok_or_else(|| PreviewError::invalid("geometry", "Cannot center on an empty geometry"))?;
        let (lon, lat) = geometry
            .center()
            .ok_or_else(|| PreviewError::invalid("geometry", "Cannot center on an empty geometry"))?;

        let zoom = match zoom {
            Some(z) => z.min(MAX_ZOOM),
            None if geometry.is_point() || (bounds.width() <= 0.0 && bounds.height() <= 0.0) => {
                POINT_ZOOM
            }
            None => {
                let frac_x = bounds.width() / 360.0;
                let frac_y = (mercator_y(bounds.max().y) - mercator_y(bounds.min().y)) / (2.0 * PI);

                let fit = |pixels: u32, frac: f64| {
                    if frac > 0.0 {
                        (pixels as f64 / TILE_SIZE / frac).log2()
                    } else {
                        f64::INFINITY
                    }
                };
                let z = fit(width, frac_x).min(fit(height, frac_y)).floor();
                z.clamp(0.0, MAX_ZOOM as f64) as u8
            }
        };

        Ok(Viewport { lon, lat, zoom })
    }
}
