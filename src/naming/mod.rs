//! Collision-safe file naming.
//!
//! - `slug`: normalizes user supplied base names.
//! - `resolve`: picks the first free `base.ext`, `base_(1).ext`, ... in a namespace.
//! - `extension`: extension derivation and extension -> category mapping.

pub mod extension;
mod resolve;
mod slug;

pub use extension::{DEFAULT_EXTENSION, ExtensionMap, extension_of, normalize_extension, stem_of};
pub use resolve::{PLACEHOLDER_BASE, resolve, resolve_normalized};
pub use slug::slugify;
