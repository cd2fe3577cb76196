//! Visualization parameters for a map layer.
//!
//! These only affect display. The JSON form uses the same keys a hosted map
//! client expects: `opacity`, `bands`, `min`, `max`, `gamma`, `palette`.

use serde::{Deserialize, Serialize};

use super::palette::Palette;
use crate::error::{PreviewError, Result};

/// A display range bound, either shared by all bands or one value per band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BandValues {
    Uniform(f64),
    PerBand(Vec<f64>),
}

impl BandValues {
    fn values(&self) -> &[f64] {
        match self {
            BandValues::Uniform(v) => std::slice::from_ref(v),
            BandValues::PerBand(vs) => vs,
        }
    }

    /// The bound for band `index`
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            BandValues::Uniform(v) => Some(*v),
            BandValues::PerBand(vs) => vs.get(index).copied(),
        }
    }
}

impl From<f64> for BandValues {
    fn from(value: f64) -> Self {
        BandValues::Uniform(value)
    }
}

/// Visualization configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisParams {
    /// Layer opacity, 0 (transparent) to 1 (opaque)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    /// One band (grey or palette) or three bands (red, green, blue)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bands: Option<Vec<String>>,

    /// Value shown as the darkest color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<BandValues>,

    /// Value shown as the brightest color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<BandValues>,

    /// Gamma correction exponent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,

    /// Color ramp for single-band renders (CSS names or hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
}

impl VisParams {
    /// Three-band composite with a shared linear stretch and gamma
    pub fn rgb(bands: [&str; 3], min: f64, max: f64, gamma: f64) -> Self {
        VisParams {
            opacity: Some(1.0),
            bands: Some(bands.iter().map(|b| b.to_string()).collect()),
            min: Some(min.into()),
            max: Some(max.into()),
            gamma: Some(gamma),
            palette: None,
        }
    }

    /// Single-band render through a palette
    pub fn single_band(band: &str, min: f64, max: f64, palette: &[&str]) -> Self {
        VisParams {
            opacity: None,
            bands: Some(vec![band.to_string()]),
            min: Some(min.into()),
            max: Some(max.into()),
            gamma: None,
            palette: Some(palette.iter().map(|c| c.to_string()).collect()),
        }
    }

    /// Check the parameters on their own, without knowing the image
    pub fn validate_shape(&self) -> Result<()> {
        if let Some(opacity) = self.opacity {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(PreviewError::invalid(
                    "opacity",
                    format!("Opacity {} must be between 0 and 1", opacity),
                ));
            }
        }

        if let Some(gamma) = self.gamma {
            if !gamma.is_finite() || gamma <= 0.0 {
                return Err(PreviewError::invalid(
                    "gamma",
                    format!("Gamma {} must be a positive number", gamma),
                ));
            }
        }

        if let Some(bands) = &self.bands {
            if bands.len() != 1 && bands.len() != 3 {
                return Err(PreviewError::invalid(
                    "bands",
                    format!("Expected 1 or 3 bands, got {}", bands.len()),
                ));
            }
            if bands.iter().any(|b| b.is_empty()) {
                return Err(PreviewError::invalid("bands", "Band names cannot be empty"));
            }
        }

        for (param, bound) in [("min", &self.min), ("max", &self.max)] {
            let Some(bound) = bound else { continue };
            if bound.values().iter().any(|v| !v.is_finite()) {
                return Err(PreviewError::invalid(param, "Values must be finite numbers"));
            }
            if let (BandValues::PerBand(values), Some(bands)) = (bound, &self.bands) {
                if values.len() != bands.len() {
                    return Err(PreviewError::invalid(
                        param,
                        format!(
                            "Got {} values for {} bands",
                            values.len(),
                            bands.len()
                        ),
                    ));
                }
            }
        }

        if let Some(palette) = &self.palette {
            if self.bands.as_ref().is_some_and(|b| b.len() != 1) {
                return Err(PreviewError::invalid(
                    "palette",
                    "A palette can only be used with a single band",
                ));
            }
            Palette::parse(palette)?;
        }

        Ok(())
    }

    /// Check the parameters against the band names of the image being shown.
    ///
    /// `None` means the source has no band set (an empty collection); then
    /// only the shape is checked.
    pub fn validate_for_bands(&self, available: Option<&[String]>) -> Result<()> {
        self.validate_shape()?;

        let Some(available) = available else {
            return Ok(());
        };

        if let Some(bands) = &self.bands {
            let missing: Vec<&str> = bands
                .iter()
                .filter(|b| !available.contains(b))
                .map(String::as_str)
                .collect();
            if !missing.is_empty() {
                return Err(PreviewError::invalid(
                    "bands",
                    format!(
                        "Band(s) {} not found (available: {})",
                        missing.join(", "),
                        available.join(", ")
                    ),
                ));
            }
        } else if self.palette.is_some() && available.len() != 1 {
            return Err(PreviewError::invalid(
                "palette",
                format!(
                    "A palette needs a single band but the image has {}",
                    available.len()
                ),
            ));
        }

        Ok(())
    }

    /// Palette of a single-band render, if one is set
    pub fn palette(&self) -> Result<Option<Palette>> {
        self.palette.as_deref().map(Palette::parse).transpose()
    }
}
