//! Export document assembly.

use crate::model::item::ChecklistItem;
use crate::repo::image_repo::ImageStore;
use crate::repo::RepoResult;
use crate::transfer::data_url::encode_data_url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default file name offered for exported documents.
pub const EXPORT_FILE_NAME: &str = "checklist.json";

/// Portable checklist document.
///
/// `images` maps stringified item ids to `data:` URLs; items without a
/// stored image have no entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub items: Vec<ChecklistItem>,
    pub images: BTreeMap<String, String>,
}

impl ExportDocument {
    /// Pretty-printed JSON text written to export files.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds the export document, inlining every stored item image.
pub fn export_document<S: ImageStore + ?Sized>(
    items: &[ChecklistItem],
    images: &S,
) -> RepoResult<ExportDocument> {
    let mut inline = BTreeMap::new();
    for item in items {
        let key = item.image_key();
        if let Some(blob) = images.get(&key)? {
            inline.insert(key, encode_data_url(&blob));
        }
    }

    Ok(ExportDocument {
        items: items.to_vec(),
        images: inline,
    })
}
