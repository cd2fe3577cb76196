//! Image footprints.
//!
//! Geometries read and write the GeoJSON layout (`{"type": ..., "coordinates": ...}`)
//! through `geojson`, with longitude/latitude pairs in degrees. Extents are
//! computed on the `geo` equivalents.

use geo::{BoundingRect, Coord, LineString, MapCoords, MultiPolygon, Point, Polygon, Rect};
use serde::{Deserialize, Serialize};

use crate::error::{PreviewError, Result};

/// Bounding box in degrees. `max().x` may exceed 180 for footprints that
/// cross the antimeridian.
pub type Bounds = Rect<f64>;

/// Spatial footprint of an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "geojson::Geometry", into = "geojson::Geometry")]
pub enum Geometry {
    /// A single position
    Point([f64; 2]),
    /// Outer ring followed by optional holes
    Polygon(Vec<Vec<[f64; 2]>>),
    /// Several polygons
    MultiPolygon(Vec<Vec<Vec<[f64; 2]>>>),
}

fn position(pos: &[f64]) -> Result<[f64; 2]> {
    match pos {
        [lon, lat, ..] => Ok([*lon, *lat]),
        _ => Err(PreviewError::invalid(
            "geometry",
            "Positions need a longitude and a latitude",
        )),
    }
}

fn rings_from_geojson(rings: &[Vec<geojson::Position>]) -> Result<Vec<Vec<[f64; 2]>>> {
    rings
        .iter()
        .map(|ring| ring.iter().map(|p| position(p)).collect::<Result<Vec<_>>>())
        .collect()
}

fn rings_to_geojson(rings: Vec<Vec<[f64; 2]>>) -> Vec<Vec<geojson::Position>> {
    rings
        .into_iter()
        .map(|ring| ring.into_iter().map(|p| p.to_vec()).collect())
        .collect()
}

impl TryFrom<geojson::Geometry> for Geometry {
    type Error = PreviewError;

    fn try_from(geometry: geojson::Geometry) -> Result<Self> {
        match geometry.value {
            geojson::Value::Point(p) => Ok(Geometry::Point(position(&p)?)),
            geojson::Value::Polygon(rings) => Ok(Geometry::Polygon(rings_from_geojson(&rings)?)),
            geojson::Value::MultiPolygon(polygons) => polygons
                .iter()
                .map(|rings| rings_from_geojson(rings))
                .collect::<Result<Vec<_>>>()
                .map(Geometry::MultiPolygon),
            _ => Err(PreviewError::invalid(
                "geometry",
                "Footprints must be a Point, Polygon or MultiPolygon",
            )),
        }
    }
}

impl From<Geometry> for geojson::Geometry {
    fn from(geometry: Geometry) -> Self {
        let value = match geometry {
            Geometry::Point(p) => geojson::Value::Point(p.to_vec()),
            Geometry::Polygon(rings) => geojson::Value::Polygon(rings_to_geojson(rings)),
            Geometry::MultiPolygon(polygons) => geojson::Value::MultiPolygon(
                polygons.into_iter().map(rings_to_geojson).collect(),
            ),
        };
        geojson::Geometry::new(value)
    }
}

fn polygon(rings: &[Vec<[f64; 2]>]) -> Polygon<f64> {
    let mut rings = rings
        .iter()
        .map(|ring| ring.iter().map(|&[x, y]| Coord { x, y }).collect::<LineString<f64>>());
    let exterior = rings.next().unwrap_or_else(|| LineString::new(Vec::new()));
    Polygon::new(exterior, rings.collect())
}

impl Geometry {
    /// Build a rectangular polygon from its corners
    pub fn rectangle(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Geometry::Polygon(vec![vec![
            [min_lon, min_lat],
            [max_lon, min_lat],
            [max_lon, max_lat],
            [min_lon, max_lat],
            [min_lon, min_lat],
        ]])
    }

    /// The same footprint as a `geo` geometry
    pub fn to_geo(&self) -> geo::Geometry<f64> {
        match self {
            Geometry::Point([x, y]) => Point::new(*x, *y).into(),
            Geometry::Polygon(rings) => polygon(rings).into(),
            Geometry::MultiPolygon(polygons) => {
                MultiPolygon::new(polygons.iter().map(|rings| polygon(rings)).collect()).into()
            }
        }
    }

    fn positions(&self) -> Box<dyn Iterator<Item = &[f64; 2]> + '_> {
        match self {
            Geometry::Point(p) => Box::new(std::iter::once(p)),
            Geometry::Polygon(rings) => Box::new(rings.iter().flatten()),
            Geometry::MultiPolygon(polys) => Box::new(polys.iter().flatten().flatten()),
        }
    }

    /// Bounding box, or `None` for a geometry without positions.
    ///
    /// A footprint wider than 180 degrees whose box shrinks once western
    /// longitudes are shifted by +360 is taken to cross the antimeridian, and
    /// the shifted box is returned.
    pub fn bounds(&self) -> Option<Bounds> {
        let geometry = self.to_geo();
        let rect = geometry.bounding_rect()?;
        if rect.width() <= 180.0 {
            return Some(rect);
        }

        let shifted = geometry
            .map_coords(|c: Coord<f64>| Coord {
                x: if c.x < 0.0 { c.x + 360.0 } else { c.x },
                y: c.y,
            })
            .bounding_rect()?;
        if shifted.width() > 0.0 && shifted.width() < rect.width() {
            Some(shifted)
        } else {
            Some(rect)
        }
    }

    /// Center of the bounds as `(lon, lat)`, longitude within -180 to 180
    pub fn center(&self) -> Option<(f64, f64)> {
        let center = self.bounds()?.center();
        let lon = if center.x > 180.0 {
            center.x - 360.0
        } else {
            center.x
        };
        Some((lon, center.y))
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Geometry::Point(_))
    }

    /// Check that every position is a finite lon/lat pair and that rings are closed
    pub fn validate(&self) -> Result<()> {
        for &[lon, lat] in self.positions() {
            if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
                return Err(PreviewError::invalid(
                    "geometry",
                    format!("Longitude {} must be within -180 to 180", lon),
                ));
            }
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                return Err(PreviewError::invalid(
                    "geometry",
                    format!("Latitude {} must be within -90 to 90", lat),
                ));
            }
        }

        let rings: Vec<&Vec<[f64; 2]>> = match self {
            Geometry::Point(_) => Vec::new(),
            Geometry::Polygon(rings) => rings.iter().collect(),
            Geometry::MultiPolygon(polys) => polys.iter().flatten().collect(),
        };
        for ring in rings {
            if ring.len() < 4 || ring.first() != ring.last() {
                return Err(PreviewError::invalid(
                    "geometry",
                    "Polygon rings need at least 4 positions and must be closed",
                ));
            }
        }

        if self.bounds().is_none() {
            return Err(PreviewError::invalid("geometry", "Geometry has no positions"));
        }

        Ok(())
    }
}
