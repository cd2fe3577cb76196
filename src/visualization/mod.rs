//! Display configuration for map layers.

pub mod palette;
pub mod presets;
pub mod vis_params;

pub use palette::Palette;
pub use presets::Preset;
pub use vis_params::{BandValues, VisParams};
