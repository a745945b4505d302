//! Text canonicalization shared by every comparison in the importer.
//!
//! Brand, model, color, folder, and file names are only ever compared in
//! their normalized form: diacritics stripped, upper-cased, `/` treated as a
//! word break, and whitespace collapsed.
//!
//! ```
//! use faixa_catalog::text::{normalize, slugify};
//!
//! assert_eq!(normalize("  Azul/Branco  metálico "), "AZUL BRANCO METALICO");
//! assert_eq!(slugify("BMW 1200 GS Adventure Azul/Branco"), "bmw-1200-gs-adventure-azul-branco");
//! ```

use sha2::{Digest, Sha256};
use unicode_normalization::UnicodeNormalization as _;
use unicode_normalization::char::is_combining_mark;

/// Canonicalize a string for comparison.
pub fn normalize(text: &str) -> String {
    let upper = strip_diacritics(text).to_uppercase().replace('/', " ");
    upper.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace tokens of an already-normalized string.
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}

/// Convert a string to a URL-safe slug.
///
/// Diacritics are stripped first so "Vermelho Metálico" becomes
/// `vermelho-metalico` rather than losing the accented letter.
pub fn slugify(s: &str) -> String {
    let stripped = strip_diacritics(s);
    let mut result = String::with_capacity(stripped.len());
    let mut last_was_separator = false;

    for c in stripped.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_separator = false;
        } else if !last_was_separator && !result.is_empty() {
            result.push('-');
            last_was_separator = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Content-addressed image id: a pure function of folder path and filename.
///
/// Returns the first 16 bytes of a SHA-256 over both parts, hex-encoded.
pub fn image_id(folder: &str, filename: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(folder.as_bytes());
    // Separator keeps ("a", "bc") and ("ab", "c") apart.
    hasher.update([0u8]);
    hasher.update(filename.as_bytes());
    let digest = hasher.finalize();
    digest[..16].iter().map(|b| format!("{b:02x}")).collect()
}

fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_cedilla_and_tilde() {
        assert_eq!(strip_diacritics("Peça Plástico Limão"), "Peca Plastico Limao");
    }

    #[test]
    fn image_id_separates_folder_and_filename() {
        assert_ne!(image_id("a", "bc"), image_id("ab", "c"));
        assert_eq!(image_id("HONDA/CG 160", "tanque.jpg").len(), 32);
    }
}
