//! The display surface seam.
//!
//! A surface is passed explicitly to every render and center call, so a run
//! never touches global map state and tests can hand in their own surface.

pub mod map_state;
pub mod viewport;

pub use map_state::{LayerEntry, MapState};
pub use viewport::Viewport;

use crate::error::Result;
use crate::imagery::{Geometry, Renderable};
use crate::visualization::VisParams;

/// A layer as handed to a display surface
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// What to draw
    pub source: Renderable,
    /// How to draw it, exactly as the caller gave it
    pub vis: VisParams,
    /// Layer name; the surface picks one when absent
    pub name: Option<String>,
    /// Whether the layer starts visible
    pub shown: bool,
}

/// Display collaborator
pub trait DisplaySurface {
    /// Add a layer on top of the existing ones
    fn add_layer(&mut self, layer: Layer) -> Result<()>;

    /// Move the view to a geometry, at `zoom` or at a zoom that fits it
    fn center_object(&mut self, geometry: &Geometry, zoom: Option<u8>) -> Result<()>;
}
