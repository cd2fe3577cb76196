//! Palettes for single-band layers.
//!
//! Colors are CSS names (`red`, `seagreen`) or hex strings with or without a
//! leading `#`. The ramp is interpolated evenly between them.

use colorgrad::{CustomGradient, Gradient};

use crate::error::{PreviewError, Result};

/// A parsed color ramp
pub struct Palette {
    colors: Vec<String>,
    gradient: Gradient,
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette").field("colors", &self.colors).finish()
    }
}

/// Accept bare hex (`00ff00`) the way hosted map clients do
fn normalize_color(color: &str) -> String {
    let color = color.trim();
    let is_bare_hex = matches!(color.len(), 3 | 4 | 6 | 8)
        && color.chars().all(|c| c.is_ascii_hexdigit());
    if is_bare_hex {
        format!("#{}", color)
    } else {
        color.to_string()
    }
}

impl Palette {
    /// Parse a list of colors into a ramp
    pub fn parse<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        if colors.is_empty() {
            return Err(PreviewError::invalid("palette", "Palette cannot be empty"));
        }

        let normalized: Vec<String> = colors.iter().map(|c| normalize_color(c.as_ref())).collect();

        // A single color is a flat ramp
        let stops: Vec<&str> = if normalized.len() == 1 {
            vec![normalized[0].as_str(), normalized[0].as_str()]
        } else {
            normalized.iter().map(String::as_str).collect()
        };

        let gradient = CustomGradient::new()
            .html_colors(&stops)
            .build()
            .map_err(|e| PreviewError::invalid("palette", e.to_string()))?;

        Ok(Palette {
            colors: colors.iter().map(|c| c.as_ref().to_string()).collect(),
            gradient,
        })
    }

    /// The colors as given
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    pub fn map_normalized(&self, value: f64) -> [u8; 4] {
        self.gradient.at(value.clamp(0.0, 1.0)).to_rgba8()
    }

    /// Map a value to an RGBA color given the display range
    pub fn map(&self, value: f64, min: f64, max: f64) -> [u8; 4] {
        let normalized = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.map_normalized(normalized)
    }

    /// `steps` evenly spaced swatches as `#rrggbb`, for a map legend
    pub fn legend(&self, steps: usize) -> Vec<String> {
        let steps = steps.max(2);
        (0..steps)
            .map(|i| {
                let [r, g, b, _] = self.map_normalized(i as f64 / (steps - 1) as f64);
                format!("#{:02x}{:02x}{:02x}", r, g, b)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_hex() {
        assert!(Palette::parse(&["red", "white", "green"]).is_ok());
        assert!(Palette::parse(&["#ff0000", "00ff00", "00f"]).is_ok());
        assert!(Palette::parse(&["red"]).is_ok());
        assert!(Palette::parse::<&str>(&[]).is_err());
        assert!(Palette::parse(&["red", "nope"]).is_err());
    }

    #[test]
    fn test_diverging_endpoints() {
        let palette = Palette::parse(&["red", "white", "green"]).unwrap();

        assert_eq!(palette.map(-1.0, -1.0, 1.0), [255, 0, 0, 255]);
        assert_eq!(palette.map(0.0, -1.0, 1.0), [255, 255, 255, 255]);
        // CSS green is #008000
        assert_eq!(palette.map(1.0, -1.0, 1.0), [0, 128, 0, 255]);

        // Clamped outside the range
        assert_eq!(palette.map(5.0, -1.0, 1.0), [0, 128, 0, 255]);
    }

    #[test]
    fn test_legend() {
        let palette = Palette::parse(&["red", "white", "green"]).unwrap();
        let legend = palette.legend(3);
        assert_eq!(legend, vec!["#ff0000", "#ffffff", "#008000"]);
        assert_eq!(palette.legend(0).len(), 2);
    }
}
