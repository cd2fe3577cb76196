//! Remote imagery: the service seam, deferred handles and a file-backed catalog.

pub mod catalog;
pub mod expr;
pub mod geometry;
pub mod handles;
pub mod service;

pub use catalog::StaticCatalog;
pub use expr::{evaluate, Expr, Value};
pub use geometry::{Bounds, Geometry};
pub use handles::{Computed, ImageCollectionRef, ImageList, ImageRef, Renderable};
pub use service::{CollectionInfo, ImageInfo, ImageryService};
