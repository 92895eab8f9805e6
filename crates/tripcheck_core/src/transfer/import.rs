//! Import parsing and field coercion.
//!
//! # Responsibility
//! - Accept `{ "items": [...], "images": {...} }` and the legacy bare array.
//! - Coerce each raw entry field by field into a valid `ChecklistItem`.
//! - Decode inline images so callers can restore them into the blob store.
//!
//! # Invariants
//! - Any other top-level shape is rejected before anything is produced.
//! - Every produced item has a unique id within the batch.
//! - `image_version` is always one greater than the incoming value.

use crate::model::id_alloc::IdAllocator;
use crate::model::item::{ChecklistItem, ItemId};
use crate::model::score::{normalize_score, Score, ScoreInput};
use crate::repo::image_repo::ImageBlob;
use crate::repo::RepoError;
use crate::transfer::data_url::{decode_data_url, DataUrlError};
use log::warn;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Label used for entries without a string label.
pub const UNTITLED_LABEL: &str = "Untitled Item";

/// Import failures. None of them leave partial state behind.
#[derive(Debug)]
pub enum ImportError {
    /// Payload is not JSON.
    Parse(serde_json::Error),
    /// Top-level value is neither `{items: [...]}` nor an array.
    InvalidStructure,
    /// An inline image could not be decoded.
    InvalidImage { key: String, reason: String },
    /// Restoring images or persisting the collection failed.
    Repo(RepoError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid JSON: {err}"),
            Self::InvalidStructure => write!(f, "Invalid import JSON structure."),
            Self::InvalidImage { key, reason } => {
                write!(f, "invalid image for item {key}: {reason}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InvalidStructure | Self::InvalidImage { .. } => None,
        }
    }
}

impl From<RepoError> for ImportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Validated import result, ready to be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportBundle {
    pub items: Vec<ChecklistItem>,
    /// `(image key, blob)` pairs in document order.
    pub images: Vec<(String, ImageBlob)>,
}

/// Parses an import payload without touching any store.
pub fn parse_import(text: &str, ids: &mut IdAllocator) -> Result<ImportBundle, ImportError> {
    let parsed: Value = serde_json::from_str(text)?;

    let (raw_items, raw_images) = match &parsed {
        Value::Object(document) => match document.get("items") {
            Some(Value::Array(items)) => (items.as_slice(), document.get("images")),
            _ => return Err(ImportError::InvalidStructure),
        },
        Value::Array(items) => (items.as_slice(), None),
        _ => return Err(ImportError::InvalidStructure),
    };

    let images = match raw_images {
        Some(Value::Object(images)) => decode_images(images)?,
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!(
                "event=import_images module=transfer status=skipped reason=not_an_object kind={}",
                json_kind(other)
            );
            Vec::new()
        }
    };

    Ok(ImportBundle {
        items: coerce_items(raw_items, ids),
        images,
    })
}

/// Coerces raw entries into items, keeping document order.
///
/// Entries whose `id` is missing, non-integral, or already used earlier in
/// the batch receive a fresh id from `ids`.
pub fn coerce_items(raw_items: &[Value], ids: &mut IdAllocator) -> Vec<ChecklistItem> {
    let declared: Vec<Option<ItemId>> = raw_items
        .iter()
        .map(|raw| raw.get("id").and_then(coerce_id))
        .collect();
    for id in declared.iter().flatten() {
        ids.observe(*id);
    }

    let mut seen = HashSet::with_capacity(raw_items.len());
    raw_items
        .iter()
        .zip(declared)
        .map(|(raw, declared_id)| {
            let id = match declared_id {
                Some(id) if seen.insert(id) => id,
                _ => {
                    let fresh = ids.next_id();
                    seen.insert(fresh);
                    fresh
                }
            };
            coerce_item(id, raw)
        })
        .collect()
}

fn coerce_item(id: ItemId, raw: &Value) -> ChecklistItem {
    let label = raw
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or(UNTITLED_LABEL);

    let mut item = ChecklistItem::new(id, label);
    item.checked = raw.get("checked").and_then(Value::as_bool).unwrap_or(false);
    item.notes = raw
        .get("notes")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    item.scenic_score = score_of(raw, "scenicScore");
    item.romance_score = score_of(raw, "romanceScore");
    item.educational_score = score_of(raw, "educationalScore");
    item.convenience_score = score_of(raw, "convenienceScore");

    let previous_version = raw
        .get("imageVersion")
        .and_then(Value::as_u64)
        .map_or(0, |version| u32::try_from(version).unwrap_or(u32::MAX));
    item.image_version = Some(previous_version.saturating_add(1));
    item
}

fn score_of(raw: &Value, field: &str) -> Score {
    normalize_score(raw.get(field).map_or(ScoreInput::Missing, ScoreInput::from))
}

fn coerce_id(value: &Value) -> Option<ItemId> {
    if let Some(id) = value.as_i64() {
        return Some(id);
    }
    let float = value.as_f64()?;
    let in_range = float >= ItemId::MIN as f64 && float < ItemId::MAX as f64;
    (float.is_finite() && float.fract() == 0.0 && in_range).then_some(float as ItemId)
}

fn decode_images(images: &Map<String, Value>) -> Result<Vec<(String, ImageBlob)>, ImportError> {
    images
        .iter()
        .map(|(key, value)| {
            let text = value.as_str().ok_or_else(|| ImportError::InvalidImage {
                key: key.clone(),
                reason: format!("expected a data url string, got {}", json_kind(value)),
            })?;
            let blob = decode_data_url(text).map_err(|err: DataUrlError| {
                ImportError::InvalidImage {
                    key: key.clone(),
                    reason: err.to_string(),
                }
            })?;
            Ok((key.clone(), blob))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{coerce_items, parse_import, ImportError, UNTITLED_LABEL};
    use crate::model::id_alloc::IdAllocator;
    use serde_json::json;

    #[test]
    fn rejects_non_list_shapes() {
        let mut ids = IdAllocator::new();
        for payload in ["42", "\"items\"", "{\"items\": 3}", "{\"entries\": []}"] {
            let err = parse_import(payload, &mut ids).unwrap_err();
            assert!(matches!(err, ImportError::InvalidStructure), "{payload}");
        }
        assert!(matches!(
            parse_import("{not json", &mut ids),
            Err(ImportError::Parse(_))
        ));
    }

    #[test]
    fn structure_error_message_is_user_facing() {
        let err = parse_import("{}", &mut IdAllocator::new()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid import JSON structure.");
    }

    #[test]
    fn malformed_fields_fall_back_to_defaults() {
        let raw = vec![json!({
            "id": "abc",
            "label": 12,
            "checked": "yes",
            "notes": null,
            "scenicScore": "8",
            "romanceScore": 99,
            "educationalScore": [],
            "imageVersion": 4
        })];
        let items = coerce_items(&raw, &mut IdAllocator::new());
        let item = &items[0];
        assert!(item.id > 0);
        assert_eq!(item.label, UNTITLED_LABEL);
        assert!(!item.checked);
        assert_eq!(item.notes, "");
        assert_eq!(item.scenic_score.value(), 8.0);
        assert_eq!(item.romance_score.value(), 10.0);
        assert_eq!(item.educational_score.value(), 0.0);
        assert_eq!(item.convenience_score.value(), 0.0);
        assert_eq!(item.image_version, Some(5));
    }

    #[test]
    fn duplicate_and_missing_ids_are_reassigned_uniquely() {
        let raw = vec![
            json!({"id": 5, "label": "a"}),
            json!({"id": 5, "label": "b"}),
            json!({"label": "c"}),
            json!({"label": "d"}),
            json!({"id": 2.5, "label": "e"}),
        ];
        let items = coerce_items(&raw, &mut IdAllocator::new());
        assert_eq!(items[0].id, 5);
        let mut ids: Vec<_> = items.iter().map(|item| item.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn integral_float_ids_are_kept() {
        let items = coerce_items(&[json!({"id": 12.0})], &mut IdAllocator::new());
        assert_eq!(items[0].id, 12);
    }

    #[test]
    fn non_string_image_entry_fails_the_import() {
        let payload = json!({"items": [], "images": {"1": 7}}).to_string();
        let err = parse_import(&payload, &mut IdAllocator::new()).unwrap_err();
        assert!(matches!(err, ImportError::InvalidImage { ref key, .. } if key == "1"));
    }

    #[test]
    fn non_object_images_are_ignored() {
        let mut ids = IdAllocator::new();
        for images in [json!([1, 2]), json!("nope"), json!(null)] {
            let payload = json!({"items": [{"id": 1, "label": "x"}], "images": images}).to_string();
            let bundle = parse_import(&payload, &mut ids).unwrap();
            assert!(bundle.images.is_empty(), "{payload}");
            assert_eq!(bundle.items.len(), 1);
            assert_eq!(bundle.items[0].label, "x");
        }
    }
}
