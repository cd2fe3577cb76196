//! Print what a catalog file contains: collections, images, bands and footprints.

use std::error::Error;
use std::path::PathBuf;

use delivery_preview::{ImageCollectionRef, StaticCatalog};

fn main() -> Result<(), Box<dyn Error>> {
    let file_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demo/catalog.json"));

    println!("Inspecting catalog: {}", file_path.display());
    let catalog = StaticCatalog::load(&file_path)?;

    for asset_path in catalog.asset_paths() {
        let collection = ImageCollectionRef::load(asset_path)?;
        let info = collection.materialize(&catalog)?;

        println!("\n{}", asset_path);
        println!("  images: {}", info.size);
        println!("  bands:  [{}]", info.band_names.join(", "));

        let images = collection.to_list(collection.size()).materialize(&catalog)?;
        for image in images {
            print!("    {}", image.id);
            if let Some(time) = image.time_start {
                print!("  {}", time.to_rfc3339());
            }
            match image.geometry.bounds() {
                Some(b) => println!(
                    "  [{:.4}, {:.4}, {:.4}, {:.4}]",
                    b.min().x,
                    b.min().y,
                    b.max().x,
                    b.max().y
                ),
                None => println!("  (no footprint)"),
            }
        }
    }

    println!(
        "\n{} collections, {} images",
        catalog.asset_paths().len(),
        catalog.image_count()
    );

    Ok(())
}
