//! Variant-to-image binding within a resolved folder.

use faixa_catalog::ProductImage;
use faixa_catalog::text::{normalize, tokens};

use crate::synonyms::SynonymTable;

/// Score per part token found in a filename.
const TOKEN_WEIGHT: u32 = 10;

/// Minimum score for a binding to be accepted.
const MIN_SCORE: u32 = 10;

/// Pick the image that best matches a part name.
///
/// Each part token of two or more characters scores when the normalized
/// filename contains it, or contains one of its synonyms. `images` is
/// expected in priority order; ties keep the earlier image.
pub fn bind_image<'a>(
    part: &str,
    images: &'a [ProductImage],
    synonyms: &SynonymTable,
) -> Option<&'a str> {
    let normalized_part = normalize(part);
    let part_tokens: Vec<&str> = tokens(&normalized_part)
        .filter(|t| t.chars().count() >= 2)
        .collect();
    if part_tokens.is_empty() {
        return None;
    }

    let mut best: Option<(u32, &ProductImage)> = None;
    for image in images {
        let name = normalize(&image.filename);
        let score = part_tokens
            .iter()
            .filter(|t| {
                name.contains(**t) || synonyms.alternates(**t).any(|alt| name.contains(alt))
            })
            .count() as u32
            * TOKEN_WEIGHT;

        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, image));
        }
    }

    best.filter(|(score, _)| *score >= MIN_SCORE)
        .map(|(_, image)| image.id.as_str())
}
