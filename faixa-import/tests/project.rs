use std::fs;
use std::path::Path;

use faixa_catalog::{PriceRecord, Variant, image_id};
use faixa_import::{project, project_all};
use faixa_lib::{SynonymTable, build_index, resolve};

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"img").unwrap();
}

fn variant(part: &str) -> Variant {
    Variant {
        part: part.to_string(),
        element: "PINTADO".to_string(),
        price: 99.0,
        location: "A1".to_string(),
        reference: String::new(),
    }
}

fn hayabusa() -> PriceRecord {
    PriceRecord {
        brand: "SUZUKI".to_string(),
        model: "HAYABUSA 2008".to_string(),
        legacy_model: Some("HAYABUSA 08".to_string()),
        color: "AZUL".to_string(),
        year: Some(2008),
        variants: vec![variant("TANQUE"), variant("LATERAL"), variant("ESCAPAMENTO")],
    }
}

fn asset_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for f in [
        "SUZUKI/HAYABUSA 2008 AZUL/HAYABUSA TANQUE.jpg",
        "SUZUKI/HAYABUSA 2008 AZUL/HAYABUSA LAT.jpg",
        "SUZUKI/HAYABUSA 2008 AZUL/FOTO GERAL.png",
    ] {
        touch(dir.path(), f);
    }
    dir
}

#[test]
fn handles_from_canonical_and_legacy_model() {
    let product = project(&hayabusa(), &[], &SynonymTable::default());
    assert_eq!(product.handle, "suzuki-hayabusa-2008-azul");
    assert_eq!(product.legacy_handle.as_deref(), Some("suzuki-hayabusa-08-azul"));
    assert_eq!(product.name, "SUZUKI HAYABUSA 2008 AZUL");
    assert_eq!(product.metadata.year, Some(2008));
    assert!(product.description.contains("<li>TANQUE</li>"));
}

#[test]
fn images_carry_content_ids_and_variants_bind_by_part() {
    let dir = asset_tree();
    let index = build_index(dir.path());
    let record = hayabusa();
    let assets = resolve(&record.brand, &record.model, &record.color, &index);
    let product = project(&record, &assets, &SynonymTable::default());

    let files: Vec<&str> = product.images.iter().map(|i| i.filename.as_str()).collect();
    assert_eq!(files, vec!["HAYABUSA LAT.jpg", "HAYABUSA TANQUE.jpg", "FOTO GERAL.png"]);
    let positions: Vec<u32> = product.images.iter().map(|i| i.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);

    let tanque_id = image_id("SUZUKI/HAYABUSA 2008 AZUL", "HAYABUSA TANQUE.jpg");
    let lat_id = image_id("SUZUKI/HAYABUSA 2008 AZUL", "HAYABUSA LAT.jpg");
    assert_eq!(product.images[1].id, tanque_id);
    assert_eq!(product.images[1].src, "SUZUKI/HAYABUSA 2008 AZUL/HAYABUSA TANQUE.jpg");

    assert_eq!(product.variants[0].image_id.as_deref(), Some(tanque_id.as_str()));
    // Bound through the LAT/LATERAL synonym.
    assert_eq!(product.variants[1].image_id.as_deref(), Some(lat_id.as_str()));
    assert_eq!(product.variants[2].image_id, None);
}

#[test]
fn projection_is_stable_across_runs() {
    let dir = asset_tree();
    let first = project_all(&[hayabusa()], &build_index(dir.path()), &SynonymTable::default()).0;
    let second = project_all(&[hayabusa()], &build_index(dir.path()), &SynonymTable::default()).0;
    assert_eq!(first, second);
}

#[test]
fn project_all_counts_missing_assets_and_bindings() {
    let dir = asset_tree();
    let index = build_index(dir.path());
    let mut other = hayabusa();
    other.model = "GSX 750".to_string();
    other.legacy_model = None;
    other.year = None;

    let (products, stats) = project_all(&[hayabusa(), other], &index, &SynonymTable::default());
    assert_eq!(products.len(), 2);
    assert_eq!(stats.products, 2);
    assert_eq!(stats.products_without_assets, 1);
    assert_eq!(stats.images, 3);
    // ESCAPAMENTO on the first product, all three on the second.
    assert_eq!(stats.variants_without_image, 4);
    assert_eq!(products[1].handle, "suzuki-gsx-750-azul");
}

#[test]
fn project_all_counts_handle_collisions() {
    let dir = tempfile::tempdir().unwrap();
    let index = build_index(dir.path());
    let mut slash = hayabusa();
    slash.color = "AZUL/BRANCO".to_string();
    let mut space = hayabusa();
    space.color = "AZUL BRANCO".to_string();

    let (products, stats) = project_all(&[slash, space], &index, &SynonymTable::default());
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].handle, products[1].handle);
    assert_eq!(stats.handle_collisions, 1);
}
