//! In-memory display surface.
//!
//! Keeps the layer stack and the viewport a map client would show, and
//! serializes them as JSON.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::viewport::Viewport;
use super::{DisplaySurface, Layer};
use crate::error::Result;
use crate::imagery::Geometry;
use crate::visualization::VisParams;

/// Swatches per palette legend
const LEGEND_STEPS: usize = 5;

/// One layer of the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub name: String,
    /// Deferred expression of the layer source
    pub source: String,
    pub vis: VisParams,
    pub shown: bool,
    /// Palette swatches, for single-band layers with a palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Vec<String>>,
}

/// Layers and viewport of a map display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapState {
    /// Display width in pixels
    pub width: u32,
    /// Display height in pixels
    pub height: u32,
    pub layers: Vec<LayerEntry>,
    pub viewport: Option<Viewport>,
}

impl MapState {
    pub fn new(width: u32, height: u32) -> Self {
        MapState {
            width,
            height,
            layers: Vec::new(),
            viewport: None,
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl DisplaySurface for MapState {
    fn add_layer(&mut self, layer: Layer) -> Result<()> {
        let legend = layer
            .vis
            .palette()?
            .map(|palette| palette.legend(LEGEND_STEPS));
        let name = layer
            .name
            .unwrap_or_else(|| format!("Layer {}", self.layers.len() + 1));

        info!(
            layer = %name,
            source = %layer.source,
            shown = layer.shown,
            "Layer added"
        );

        self.layers.push(LayerEntry {
            name,
            source: layer.source.to_string(),
            vis: layer.vis,
            shown: layer.shown,
            legend,
        });
        Ok(())
    }

    fn center_object(&mut self, geometry: &Geometry, zoom: Option<u8>) -> Result<()> {
        let viewport = Viewport::fit(geometry, self.width, self.height, zoom)?;
        info!(
            lon = viewport.lon,
            lat = viewport.lat,
            zoom = viewport.zoom,
            "Viewport centered"
        );
        self.viewport = Some(viewport);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imagery::{ImageCollectionRef, Renderable};
    use crate::visualization::Preset;

    fn layer(vis: VisParams, name: Option<&str>) -> Layer {
        let collection = ImageCollectionRef::load("projects/demo/assets/kunar").unwrap();
        Layer {
            source: Renderable::Collection(collection),
            vis,
            name: name.map(str::to_string),
            shown: true,
        }
    }

    #[test]
    fn test_layers_stack_in_order() {
        let mut map = MapState::new(800, 600);
        map.add_layer(layer(Preset::TrueColor.vis_params(), None)).unwrap();
        map.add_layer(layer(Preset::Ndvi.vis_params(), Some("NDVI"))).unwrap();

        assert_eq!(map.layer_count(), 2);
        assert_eq!(map.layers[0].name, "Layer 1");
        assert_eq!(map.layers[0].legend, None);
        assert_eq!(map.layers[1].name, "NDVI");
        assert_eq!(map.layers[1].legend.as_ref().map(Vec::len), Some(LEGEND_STEPS));
        assert_eq!(
            map.layers[0].source,
            r#"ImageCollection("projects/demo/assets/kunar")"#
        );
    }

    #[test]
    fn test_center_sets_viewport() {
        let mut map = MapState::new(800, 600);
        assert!(map.viewport.is_none());
        map.center_object(&Geometry::Point([71.0, 34.9]), Some(10)).unwrap();
        assert_eq!(
            map.viewport,
            Some(Viewport {
                lon: 71.0,
                lat: 34.9,
                zoom: 10
            })
        );
    }

    #[test]
    fn test_json_roundtrip_shape() {
        let mut map = MapState::new(800, 600);
        map.add_layer(layer(Preset::TrueColor.vis_params(), None)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&map.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["layers"][0]["vis"]["bands"][0], "B3");
        assert_eq!(json["viewport"], serde_json::Value::Null);
    }
}
