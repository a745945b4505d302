//! Product-to-folder matching.
//!
//! A folder is only a candidate when its normalized key contains every
//! model token; color tokens add score but can never stand in for a missing
//! model token. The best candidate's images are then de-duplicated and
//! ordered so the most specific shots come first.

use std::collections::HashSet;

use faixa_catalog::text::{normalize, tokens};
use faixa_catalog::{AssetFolder, ImageAsset};

use crate::assets::AssetIndex;

/// Score per matched model token.
const REQUIRED_WEIGHT: i32 = 10;
/// Score per matched color token.
const OPTIONAL_WEIGHT: i32 = 3;
/// Bonus when every color token matched.
const FULL_COLOR_BONUS: i32 = 5;

/// Filename suffix marking the preferred copy of a duplicated image.
pub const PRIMARY_MARKER: &str = "PRIMEIRA";

/// Resolve the images for a product.
///
/// Returns an empty list when the brand has no folders or no folder
/// contains every model token.
pub fn resolve(brand: &str, model: &str, color: &str, index: &AssetIndex) -> Vec<ImageAsset> {
    let normalized_model = normalize(model);
    let normalized_color = normalize(color);
    let required: Vec<&str> = tokens(&normalized_model)
        .filter(|t| t.chars().count() > 1)
        .collect();
    let optional: Vec<&str> = tokens(&normalized_color)
        .filter(|t| t.chars().count() > 2)
        .collect();

    let Some(folder) = best_folder(index.folders(brand), &required, &optional) else {
        log::debug!("No asset folder for {} {} {}", brand, model, color);
        return Vec::new();
    };

    let brand_token = normalize(brand);
    let mut images = drop_plain_duplicates(&folder.images);
    images.sort_by_cached_key(|name| (priority(name, &required, &brand_token), name.clone()));

    images
        .into_iter()
        .zip(1u32..)
        .map(|(filename, position)| ImageAsset {
            folder: folder.path.clone(),
            filename,
            position,
        })
        .collect()
}

/// Highest-scoring eligible folder; ties go to the earliest folder.
fn best_folder<'a>(
    folders: &'a [AssetFolder],
    required: &[&str],
    optional: &[&str],
) -> Option<&'a AssetFolder> {
    let mut best: Option<(i32, &AssetFolder)> = None;

    for folder in folders {
        let key = folder.normalized_key.as_str();
        if !required.iter().all(|t| key.contains(t)) {
            continue;
        }

        let matched_optional = optional.iter().filter(|t| key.contains(*t)).count() as i32;
        let mut score =
            REQUIRED_WEIGHT * required.len() as i32 + OPTIONAL_WEIGHT * matched_optional;
        if !optional.is_empty() && matched_optional == optional.len() as i32 {
            score += FULL_COLOR_BONUS;
        }

        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, folder));
        }
    }

    best.map(|(_, folder)| folder)
}

/// Drop `X.jpg` when a sibling `X PRIMEIRA.*` exists.
fn drop_plain_duplicates(images: &[String]) -> Vec<String> {
    let stems: HashSet<String> = images.iter().map(|name| normalize(stem(name))).collect();

    images
        .iter()
        .filter(|name| {
            let marked = format!("{} {}", normalize(stem(name)), PRIMARY_MARKER);
            !stems.contains(&marked)
        })
        .cloned()
        .collect()
}

/// Sort key: lower sorts first.
fn priority(filename: &str, required: &[&str], brand_token: &str) -> i32 {
    let name = normalize(filename);
    let mut key = -10 * required.iter().filter(|t| name.contains(*t)).count() as i32;
    if !brand_token.is_empty() && name.contains(brand_token) {
        key -= 5;
    }
    if name.contains("KIT") {
        key -= 3;
    }
    key
}

fn stem(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map_or(filename, |(stem, _)| stem)
}
