//! The preview pipeline: load, render, select, center.
//!
//! Each step is a thin call into the two collaborators. Errors are returned
//! as the collaborators report them and stop the remaining steps.

use std::time::Instant;
use tracing::{debug, info};

use crate::config::PreviewConfig;
use crate::display::{DisplaySurface, Layer};
use crate::error::Result;
use crate::imagery::{Geometry, ImageCollectionRef, ImageRef, ImageryService, Renderable};
use crate::logging::{log_operation_end, log_operation_start, log_timed_operation};
use crate::visualization::VisParams;

/// Handles produced by a preview run
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewOutcome {
    pub primary: ImageCollectionRef,
    pub secondary: ImageCollectionRef,
    /// The image the view was centered on
    pub image: ImageRef,
    /// Footprint of that image
    pub geometry: Geometry,
}

/// Resolve an asset path to a collection handle. Nothing is fetched.
pub fn load_collection(asset_path: &str) -> Result<ImageCollectionRef> {
    let collection = ImageCollectionRef::load(asset_path)?;
    debug!(asset_path = asset_path, "Collection handle created");
    Ok(collection)
}

/// Deferred image at `index` of the collection's full list
pub fn select_image(collection: &ImageCollectionRef, index: i64) -> ImageRef {
    collection.to_list(collection.size()).get(index)
}

/// Deferred first image of the collection
pub fn select_first(collection: &ImageCollectionRef) -> ImageRef {
    select_image(collection, 0)
}

/// Add one layer showing `source` with `vis`.
///
/// The source's band names are materialized to check `vis` against them;
/// `vis` itself reaches the surface untouched.
pub fn add_layer<S, D>(
    service: &S,
    surface: &mut D,
    source: impl Into<Renderable>,
    vis: VisParams,
    name: Option<&str>,
) -> Result<()>
where
    S: ImageryService + ?Sized,
    D: DisplaySurface + ?Sized,
{
    let source = source.into();
    let value = source.materialize(service)?;
    vis.validate_for_bands(value.band_names()?)?;

    debug!(source = %source, bands = ?vis.bands, "Rendering layer");

    surface.add_layer(Layer {
        source,
        vis,
        name: name.map(str::to_string),
        shown: true,
    })
}

/// Center the surface on the image's own footprint
pub fn center_object<S, D>(
    service: &S,
    surface: &mut D,
    image: &ImageRef,
    zoom: Option<u8>,
) -> Result<Geometry>
where
    S: ImageryService + ?Sized,
    D: DisplaySurface + ?Sized,
{
    let geometry = image.geometry().materialize_geometry(service)?;
    surface.center_object(&geometry, zoom)?;
    Ok(geometry)
}

/// Run the preview once: load both collections, show the secondary one,
/// and center on its first image
pub fn run_preview<S, D>(service: &S, surface: &mut D, config: &PreviewConfig) -> Result<PreviewOutcome>
where
    S: ImageryService + ?Sized,
    D: DisplaySurface + ?Sized,
{
    let start = Instant::now();
    log_operation_start("preview", Some(&config.secondary_collection));

    let primary = load_collection(&config.primary_collection)?;
    let secondary = load_collection(&config.secondary_collection)?;

    log_timed_operation("render", || {
        add_layer(
            service,
            surface,
            secondary.clone(),
            config.visualization.clone(),
            config.layer_name.as_deref(),
        )
    })?;

    let image = select_first(&secondary);

    let geometry = log_timed_operation("center", || {
        center_object(service, surface, &image, config.zoom)
    })?;

    info!(
        primary = %primary.asset_path(),
        secondary = %secondary.asset_path(),
        image = %image,
        "Preview ready"
    );
    log_operation_end("preview", start, true);

    Ok(PreviewOutcome {
        primary,
        secondary,
        image,
        geometry,
    })
}
