//! Catalog projection: price record plus resolved images to catalog product.

use std::collections::HashSet;

use faixa_catalog::{
    CatalogProduct, ImageAsset, PriceRecord, ProductImage, ProductMetadata, ProductVariant,
    image_id, slugify,
};
use faixa_lib::{AssetIndex, SynonymTable, bind_image, resolve};

/// Product description. `{name}` is the product name and `{parts}` the list
/// items for its distinct part names.
pub const DESCRIPTION_TEMPLATE: &str =
    "<p>Peças para {name}.</p>\n<p>Itens disponíveis:</p>\n<ul>\n{parts}</ul>";

/// Counters from projecting a run's records.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectionStats {
    pub products: usize,
    /// Products for which no asset folder matched.
    pub products_without_assets: usize,
    /// Variants that were left without an image binding.
    pub variants_without_image: usize,
    pub images: usize,
    /// Products whose handle was already taken by an earlier product.
    pub handle_collisions: usize,
}

/// Build the catalog product for one record and its resolved images.
///
/// `assets` must be in position order; variant binding prefers earlier images.
pub fn project(record: &PriceRecord, assets: &[ImageAsset], synonyms: &SynonymTable) -> CatalogProduct {
    let name = display_name(&record.brand, &record.model, &record.color);
    let handle = slugify(&name);
    let legacy_handle = record
        .legacy_model
        .as_deref()
        .map(|legacy| slugify(&display_name(&record.brand, legacy, &record.color)));

    let images: Vec<ProductImage> = assets
        .iter()
        .map(|asset| ProductImage {
            id: image_id(&asset.folder, &asset.filename),
            src: format!("{}/{}", asset.folder, asset.filename),
            filename: asset.filename.clone(),
            position: asset.position,
            alt: name.clone(),
        })
        .collect();

    let variants = record
        .variants
        .iter()
        .map(|v| ProductVariant {
            part: v.part.clone(),
            element: v.element.clone(),
            price: v.price,
            location: v.location.clone(),
            reference: v.reference.clone(),
            image_id: bind_image(&v.part, &images, synonyms).map(str::to_string),
        })
        .collect();

    CatalogProduct {
        description: describe(&name, record),
        handle,
        legacy_handle,
        name,
        variants,
        images,
        metadata: ProductMetadata {
            brand: record.brand.clone(),
            model: record.model.clone(),
            color: record.color.clone(),
            year: record.year,
        },
    }
}

/// Resolve images for every record and project it.
///
/// Distinct records can slugify to the same handle. Such products are kept
/// and counted; the bulk write rejects all but the first.
pub fn project_all(
    records: &[PriceRecord],
    index: &AssetIndex,
    synonyms: &SynonymTable,
) -> (Vec<CatalogProduct>, ProjectionStats) {
    let mut stats = ProjectionStats::default();
    let mut handles: HashSet<String> = HashSet::new();

    let products: Vec<CatalogProduct> = records
        .iter()
        .map(|record| {
            let assets = resolve(&record.brand, &record.model, &record.color, index);
            if assets.is_empty() {
                stats.products_without_assets += 1;
            }
            let product = project(record, &assets, synonyms);
            if !handles.insert(product.handle.clone()) {
                log::warn!(
                    "Handle '{}' of {} {} {} is already used by another product",
                    product.handle,
                    record.brand,
                    record.model,
                    record.color
                );
                stats.handle_collisions += 1;
            }
            stats.images += product.images.len();
            stats.variants_without_image +=
                product.variants.iter().filter(|v| v.image_id.is_none()).count();
            product
        })
        .collect();

    stats.products = products.len();
    (products, stats)
}

fn display_name(brand: &str, model: &str, color: &str) -> String {
    [brand, model, color]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe(name: &str, record: &PriceRecord) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for variant in &record.variants {
        let part = variant.part.as_str();
        if !part.is_empty() && !parts.contains(&part) {
            parts.push(part);
        }
    }

    let items: String = parts.iter().map(|p| format!("<li>{p}</li>\n")).collect();
    DESCRIPTION_TEMPLATE
        .replace("{name}", name)
        .replace("{parts}", &items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faixa_catalog::Variant;

    fn variant(part: &str) -> Variant {
        Variant {
            part: part.to_string(),
            element: String::new(),
            price: 0.0,
            location: String::new(),
            reference: String::new(),
        }
    }

    #[test]
    fn description_lists_distinct_parts_in_order() {
        let record = PriceRecord {
            brand: "HONDA".into(),
            model: "CG 160".into(),
            legacy_model: None,
            color: "AZUL".into(),
            year: None,
            variants: vec![variant("TANQUE"), variant(""), variant("LATERAL"), variant("TANQUE")],
        };
        let text = describe("HONDA CG 160 AZUL", &record);
        assert_eq!(
            text,
            "<p>Peças para HONDA CG 160 AZUL.</p>\n<p>Itens disponíveis:</p>\n<ul>\n\
             <li>TANQUE</li>\n<li>LATERAL</li>\n</ul>"
        );
    }

    #[test]
    fn display_name_skips_blank_color() {
        assert_eq!(display_name("HONDA", "CG 160", ""), "HONDA CG 160");
    }
}
