//! Asset tree indexer.
//!
//! The asset root holds one folder per brand. Below a brand folder the
//! layout is free-form: any folder that directly contains images becomes an
//! [`AssetFolder`], keyed by its normalized path below the brand. Folders
//! nested inside an image folder are indexed on their own.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use faixa_catalog::AssetFolder;
use faixa_catalog::text::normalize;

/// File extensions (lowercase) recognized as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Immutable index of image-bearing folders, grouped by normalized brand.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    root: PathBuf,
    brands: HashMap<String, Vec<AssetFolder>>,
}

impl AssetIndex {
    /// The asset root this index was built from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folders for a brand in encounter order. The brand is normalized first.
    pub fn folders(&self, brand: &str) -> &[AssetFolder] {
        self.brands
            .get(&normalize(brand))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn brand_count(&self) -> usize {
        self.brands.len()
    }

    pub fn folder_count(&self) -> usize {
        self.brands.values().map(Vec::len).sum()
    }

    pub fn image_count(&self) -> usize {
        self.brands
            .values()
            .flatten()
            .map(|f| f.images.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

/// Build the asset index for `root`.
///
/// A missing or unreadable root yields an empty index and a warning; the
/// import carries on without images.
pub fn build_index(root: &Path) -> AssetIndex {
    let mut index = AssetIndex {
        root: root.to_path_buf(),
        brands: HashMap::new(),
    };

    if !root.is_dir() {
        log::warn!("Asset root not found at {}; importing without images", root.display());
        return index;
    }

    for brand_dir in sorted_subdirs(root) {
        let Some(brand_name) = dir_name(&brand_dir) else {
            continue;
        };
        let mut visitor = FolderVisitor {
            segments: vec![brand_name],
            folders: Vec::new(),
        };
        visitor.visit(&brand_dir);

        let key = normalize(&visitor.segments[0]);
        log::debug!(
            "Indexed {} image folder(s) for brand '{}'",
            visitor.folders.len(),
            key
        );
        index.brands.entry(key).or_default().extend(visitor.folders);
    }

    index
}

/// Depth-first walk below one brand folder.
struct FolderVisitor {
    /// Folder names from the brand folder down to the current folder.
    segments: Vec<String>,
    folders: Vec<AssetFolder>,
}

impl FolderVisitor {
    fn visit(&mut self, dir: &Path) {
        for child in sorted_subdirs(dir) {
            let Some(name) = dir_name(&child) else {
                continue;
            };
            self.segments.push(name);

            let images = collect_images(&child);
            if !images.is_empty() {
                self.folders.push(AssetFolder {
                    path: self.segments.join("/"),
                    normalized_key: normalize(&self.segments[1..].join(" ")),
                    images,
                });
            }
            self.visit(&child);

            self.segments.pop();
        }
    }
}

/// Subdirectories of `dir`, sorted by path. Unreadable directories are skipped.
///
/// Symlinked directories are not followed.
fn sorted_subdirs(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            log::warn!("Cannot read asset folder {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
        .map(|e| e.path())
        .collect();
    dirs.sort();
    dirs
}

/// Image filenames directly inside `dir`, sorted.
fn collect_images(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return Vec::new(),
    };

    let mut files: Vec<String> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_image(p))
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .collect();

    files.sort();
    files
}

/// Check if a path has an image extension (case-insensitive).
fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}
