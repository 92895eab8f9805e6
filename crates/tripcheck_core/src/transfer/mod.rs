//! Portable import/export of the checklist.
//!
//! # Responsibility
//! - Serialize the item collection plus inline base64 images to one document.
//! - Parse both the current `{items, images}` shape and the legacy bare array,
//!   coercing malformed fields instead of rejecting items.
//!
//! # Invariants
//! - Parsing is side-effect free; callers apply the resulting bundle.
//! - Only structural problems fail an import; field problems are defaulted.

pub mod data_url;
pub mod export;
pub mod import;
