//! Asset tree indexing, fuzzy image matching, and shared settings.
//!
//! The asset index is built once per run from the filesystem and is
//! read-only afterwards; the resolver and binder only ever borrow it.

pub mod assets;
pub mod binder;
pub mod error;
pub mod resolver;
pub mod settings;
pub mod synonyms;

pub use assets::{AssetIndex, IMAGE_EXTENSIONS, build_index};
pub use binder::bind_image;
pub use error::SettingsError;
pub use resolver::resolve;
pub use settings::{Settings, SynonymEntry};
pub use synonyms::SynonymTable;
