//! Named visualization presets for four-band and eight-band surface
//! reflectance deliveries.
//!
//! Only [`Preset::TrueColor`] is used when a preview runs. The others are kept
//! as ready-made alternatives and are not selected by anything.

use super::vis_params::VisParams;
use crate::imagery::{ImageCollectionRef, ImageRef, Renderable};

/// Lower bound of the reflectance stretch
pub const STRETCH_MIN: f64 = 405.79;
/// Upper bound of the reflectance stretch
pub const STRETCH_MAX: f64 = 4499.71;
/// Display gamma for reflectance composites
pub const STRETCH_GAMMA: f64 = 2.331;

/// Band name of the derived vegetation index
pub const NDVI_BAND: &str = "NDVI";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Red, green, blue
    TrueColor,
    /// Near-infrared, green, red
    FalseColor,
    /// Eight-band natural color
    EightBand,
    /// Normalized difference of NIR and red, through a diverging palette
    Ndvi,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::TrueColor,
        Preset::FalseColor,
        Preset::EightBand,
        Preset::Ndvi,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::TrueColor => "true-color",
            Preset::FalseColor => "false-color",
            Preset::EightBand => "eight-band",
            Preset::Ndvi => "ndvi",
        }
    }

    pub fn vis_params(&self) -> VisParams {
        match self {
            Preset::TrueColor => {
                VisParams::rgb(["B3", "B2", "B1"], STRETCH_MIN, STRETCH_MAX, STRETCH_GAMMA)
            }
            Preset::FalseColor => {
                VisParams::rgb(["B4", "B2", "B3"], STRETCH_MIN, STRETCH_MAX, STRETCH_GAMMA)
            }
            Preset::EightBand => {
                VisParams::rgb(["B6", "B4", "B2"], STRETCH_MIN, STRETCH_MAX, STRETCH_GAMMA)
            }
            Preset::Ndvi => VisParams::single_band(NDVI_BAND, -1.0, 1.0, &["red", "white", "green"]),
        }
    }

    /// What the preset renders: the whole collection, or for NDVI an index
    /// derived from the selected image
    pub fn source(&self, collection: &ImageCollectionRef, image: &ImageRef) -> Renderable {
        match self {
            Preset::Ndvi => ndvi(image).into(),
            _ => collection.clone().into(),
        }
    }
}

/// Deferred NDVI of a four-band image (B4 near-infrared, B3 red)
pub fn ndvi(image: &ImageRef) -> ImageRef {
    image.normalized_difference("B4", "B3").rename([NDVI_BAND])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imagery::Expr;

    #[test]
    fn test_preset_params_are_well_formed() {
        for preset in Preset::ALL {
            assert!(
                preset.vis_params().validate_shape().is_ok(),
                "{} is malformed",
                preset.name()
            );
        }
    }

    #[test]
    fn test_band_orders() {
        assert_eq!(
            Preset::FalseColor.vis_params().bands.unwrap(),
            vec!["B4", "B2", "B3"]
        );
        assert_eq!(
            Preset::EightBand.vis_params().bands.unwrap(),
            vec!["B6", "B4", "B2"]
        );
        let ndvi = Preset::Ndvi.vis_params();
        assert_eq!(ndvi.palette.unwrap(), vec!["red", "white", "green"]);
    }

    #[test]
    fn test_sources() {
        let collection = ImageCollectionRef::load("projects/demo/assets/kunar").unwrap();
        let image = collection.to_list(collection.size()).get(0);

        assert_eq!(
            Preset::FalseColor.source(&collection, &image),
            Renderable::Collection(collection.clone())
        );
        match Preset::Ndvi.source(&collection, &image) {
            Renderable::Image(ndvi) => {
                assert!(matches!(ndvi.expr(), Expr::Rename { .. }));
            }
            other => panic!("unexpected source {other:?}"),
        }
    }
}
