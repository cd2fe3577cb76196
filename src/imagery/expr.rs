//! Deferred expression graph and its evaluator.
//!
//! Handles never hold remote data. They hold an [`Expr`] describing how to
//! obtain it, and [`evaluate`] walks that graph against an
//! [`ImageryService`] only when a value is actually needed.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::geometry::Geometry;
use super::service::{CollectionInfo, ImageInfo, ImageryService};
use crate::error::{PreviewError, Result};

/// Band name produced by a normalized difference
pub const NORMALIZED_DIFFERENCE_BAND: &str = "nd";

/// A node of the deferred computation graph
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Collection stored at an asset path
    Collection { asset_path: String },
    /// Literal count
    Number { value: usize },
    /// Image count of a collection
    Size { collection: Arc<Expr> },
    /// First `count` images of a collection
    ToList { collection: Arc<Expr>, count: Arc<Expr> },
    /// One element of a list; negative indices count from the end
    Get { list: Arc<Expr>, index: i64 },
    /// Footprint of an image
    Geometry { image: Arc<Expr> },
    /// `(a - b) / (a + b)` of two bands, as a single-band image
    NormalizedDifference { image: Arc<Expr>, bands: [String; 2] },
    /// Same image with new band names
    Rename { image: Arc<Expr>, names: Vec<String> },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Collection { asset_path } => write!(f, "ImageCollection({:?})", asset_path),
            Expr::Number { value } => write!(f, "{}", value),
            Expr::Size { collection } => write!(f, "{}.size()", collection),
            Expr::ToList { collection, count } => write!(f, "{}.toList({})", collection, count),
            Expr::Get { list, index } => write!(f, "{}.get({})", list, index),
            Expr::Geometry { image } => write!(f, "{}.geometry()", image),
            Expr::NormalizedDifference { image, bands } => {
                write!(f, "{}.normalizedDifference({:?})", image, bands)
            }
            Expr::Rename { image, names } => write!(f, "{}.rename({:?})", image, names),
        }
    }
}

/// A materialized result
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Collection(CollectionInfo),
    Number(usize),
    List(Vec<Value>),
    Image(ImageInfo),
    Geometry(Geometry),
}

impl Value {
    /// Short name of the value's kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Collection(_) => "ImageCollection",
            Value::Number(_) => "Number",
            Value::List(_) => "List",
            Value::Image(_) => "Image",
            Value::Geometry(_) => "Geometry",
        }
    }

    fn mismatch(&self, expected: &str) -> PreviewError {
        PreviewError::Evaluation {
            message: format!("Expected {}, got {}", expected, self.kind()),
        }
    }

    pub fn into_collection(self) -> Result<CollectionInfo> {
        match self {
            Value::Collection(info) => Ok(info),
            other => Err(other.mismatch("ImageCollection")),
        }
    }

    pub fn into_number(self) -> Result<usize> {
        match self {
            Value::Number(n) => Ok(n),
            other => Err(other.mismatch("Number")),
        }
    }

    pub fn into_list(self) -> Result<Vec<Value>> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other.mismatch("List")),
        }
    }

    pub fn into_image(self) -> Result<ImageInfo> {
        match self {
            Value::Image(info) => Ok(info),
            other => Err(other.mismatch("Image")),
        }
    }

    pub fn into_geometry(self) -> Result<Geometry> {
        match self {
            Value::Geometry(geometry) => Ok(geometry),
            other => Err(other.mismatch("Geometry")),
        }
    }

    /// Band names of a renderable value.
    ///
    /// `None` for an empty collection, which has no band set to check against.
    pub fn band_names(&self) -> Result<Option<&[String]>> {
        match self {
            Value::Collection(info) if info.size == 0 => Ok(None),
            Value::Collection(info) => Ok(Some(info.band_names.as_slice())),
            Value::Image(info) => Ok(Some(info.bands.as_slice())),
            other => Err(other.mismatch("ImageCollection or Image")),
        }
    }
}

/// Map a possibly negative index onto `0..len`
fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len_i = i64::try_from(len).ok()?;
    let pos = if index < 0 { len_i + index } else { index };
    if (0..len_i).contains(&pos) {
        usize::try_from(pos).ok()
    } else {
        None
    }
}

/// Evaluate an expression against the imagery service
pub fn evaluate<S>(expr: &Expr, service: &S) -> Result<Value>
where
    S: ImageryService + ?Sized,
{
    match expr {
        Expr::Collection { asset_path } => {
            debug!(asset_path = %asset_path, "Resolving collection");
            Ok(Value::Collection(service.resolve_collection(asset_path)?))
        }
        Expr::Number { value } => Ok(Value::Number(*value)),
        Expr::Size { collection } => {
            let info = evaluate(collection, service)?.into_collection()?;
            Ok(Value::Number(info.size))
        }
        Expr::ToList { collection, count } => {
            let info = evaluate(collection, service)?.into_collection()?;
            let count = evaluate(count, service)?.into_number()?;
            debug!(asset_path = %info.asset_path, count = count, "Listing images");
            let images = service.list_images(&info.asset_path, count)?;
            Ok(Value::List(
                images.into_iter().take(count).map(Value::Image).collect(),
            ))
        }
        Expr::Get { list, index } => {
            let mut items = evaluate(list, service)?.into_list()?;
            let len = items.len();
            match resolve_index(*index, len) {
                Some(pos) => Ok(items.swap_remove(pos)),
                None => Err(PreviewError::OutOfRange { index: *index, len }),
            }
        }
        Expr::Geometry { image } => {
            let info = evaluate(image, service)?.into_image()?;
            Ok(Value::Geometry(info.geometry))
        }
        Expr::NormalizedDifference { image, bands } => {
            let info = evaluate(image, service)?.into_image()?;
            for band in bands {
                if !info.has_band(band) {
                    return Err(PreviewError::invalid(
                        "bands",
                        format!(
                            "Image {} has no band {} (available: {})",
                            info.id,
                            band,
                            info.bands.join(", ")
                        ),
                    ));
                }
            }
            Ok(Value::Image(ImageInfo {
                bands: vec![NORMALIZED_DIFFERENCE_BAND.to_string()],
                ..info
            }))
        }
        Expr::Rename { image, names } => {
            let info = evaluate(image, service)?.into_image()?;
            if names.len() != info.bands.len() {
                return Err(PreviewError::invalid(
                    "names",
                    format!(
                        "Cannot rename {} bands with {} names",
                        info.bands.len(),
                        names.len()
                    ),
                ));
            }
            Ok(Value::Image(ImageInfo {
                bands: names.clone(),
                ..info
            }))
        }
    }
}
