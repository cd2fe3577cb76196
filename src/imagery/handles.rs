//! Typed handles over the deferred graph.
//!
//! Each handle is a cheap `Arc` around an [`Expr`]. Building a handle never
//! talks to the service; `materialize` does.

use std::fmt;
use std::sync::Arc;

use super::expr::{evaluate, Expr, Value};
use super::geometry::Geometry;
use super::service::{CollectionInfo, ImageInfo, ImageryService};
use crate::error::{PreviewError, Result};

/// An untyped deferred value, e.g. a collection size or an image geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Computed {
    expr: Arc<Expr>,
}

impl Computed {
    /// A literal count
    pub fn number(value: usize) -> Self {
        Computed {
            expr: Arc::new(Expr::Number { value }),
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn materialize<S: ImageryService + ?Sized>(&self, service: &S) -> Result<Value> {
        evaluate(&self.expr, service)
    }

    /// Materialize and expect a geometry
    pub fn materialize_geometry<S: ImageryService + ?Sized>(&self, service: &S) -> Result<Geometry> {
        self.materialize(service)?.into_geometry()
    }
}

impl From<usize> for Computed {
    fn from(value: usize) -> Self {
        Computed::number(value)
    }
}

/// Handle to a remote collection, identified by its asset path
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCollectionRef {
    asset_path: String,
    expr: Arc<Expr>,
}

impl ImageCollectionRef {
    /// Create a handle for an asset path.
    ///
    /// Only emptiness is checked here; whether the asset exists is up to the
    /// service, and is only asked once the handle is materialized.
    pub fn load(asset_path: &str) -> Result<Self> {
        if asset_path.trim().is_empty() {
            return Err(PreviewError::invalid(
                "asset_path",
                "Asset path cannot be empty",
            ));
        }
        Ok(ImageCollectionRef {
            asset_path: asset_path.to_string(),
            expr: Arc::new(Expr::Collection {
                asset_path: asset_path.to_string(),
            }),
        })
    }

    pub fn asset_path(&self) -> &str {
        &self.asset_path
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Deferred image count
    pub fn size(&self) -> Computed {
        Computed {
            expr: Arc::new(Expr::Size {
                collection: self.expr.clone(),
            }),
        }
    }

    /// Deferred list of at most `count` images
    pub fn to_list(&self, count: impl Into<Computed>) -> ImageList {
        ImageList {
            expr: Arc::new(Expr::ToList {
                collection: self.expr.clone(),
                count: count.into().expr,
            }),
        }
    }

    pub fn materialize<S: ImageryService + ?Sized>(&self, service: &S) -> Result<CollectionInfo> {
        evaluate(&self.expr, service)?.into_collection()
    }
}

impl fmt::Display for ImageCollectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

/// Handle to an ordered, bounded list of images
#[derive(Debug, Clone, PartialEq)]
pub struct ImageList {
    expr: Arc<Expr>,
}

impl ImageList {
    /// Deferred element at `index`; negative indices count from the end
    pub fn get(&self, index: i64) -> ImageRef {
        ImageRef {
            expr: Arc::new(Expr::Get {
                list: self.expr.clone(),
                index,
            }),
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn materialize<S: ImageryService + ?Sized>(&self, service: &S) -> Result<Vec<ImageInfo>> {
        evaluate(&self.expr, service)?
            .into_list()?
            .into_iter()
            .map(Value::into_image)
            .collect()
    }
}

/// Handle to a single remote image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    expr: Arc<Expr>,
}

impl ImageRef {
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Deferred footprint of this image
    pub fn geometry(&self) -> Computed {
        Computed {
            expr: Arc::new(Expr::Geometry {
                image: self.expr.clone(),
            }),
        }
    }

    /// Deferred single-band image `(a - b) / (a + b)`, band named `nd`
    pub fn normalized_difference(&self, a: &str, b: &str) -> ImageRef {
        ImageRef {
            expr: Arc::new(Expr::NormalizedDifference {
                image: self.expr.clone(),
                bands: [a.to_string(), b.to_string()],
            }),
        }
    }

    /// Deferred copy with renamed bands
    pub fn rename<I, T>(&self, names: I) -> ImageRef
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        ImageRef {
            expr: Arc::new(Expr::Rename {
                image: self.expr.clone(),
                names: names.into_iter().map(Into::into).collect(),
            }),
        }
    }

    pub fn materialize<S: ImageryService + ?Sized>(&self, service: &S) -> Result<ImageInfo> {
        evaluate(&self.expr, service)?.into_image()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

/// Anything that can be added to a map as a layer
#[derive(Debug, Clone, PartialEq)]
pub enum Renderable {
    Collection(ImageCollectionRef),
    Image(ImageRef),
}

impl Renderable {
    pub fn expr(&self) -> &Expr {
        match self {
            Renderable::Collection(c) => c.expr(),
            Renderable::Image(i) => i.expr(),
        }
    }

    pub fn materialize<S: ImageryService + ?Sized>(&self, service: &S) -> Result<Value> {
        evaluate(self.expr(), service)
    }
}

impl From<ImageCollectionRef> for Renderable {
    fn from(collection: ImageCollectionRef) -> Self {
        Renderable::Collection(collection)
    }
}

impl From<ImageRef> for Renderable {
    fn from(image: ImageRef) -> Self {
        Renderable::Image(image)
    }
}

impl fmt::Display for Renderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr())
    }
}
