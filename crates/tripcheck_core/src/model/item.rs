//! Checklist item domain model.
//!
//! # Responsibility
//! - Define the canonical record stored, rendered and exported for each entry.
//! - Name the editable fields so updates can be expressed as values.
//!
//! # Invariants
//! - `id` is stable and unique within one collection.
//! - `notes` is always a string (empty by default).
//! - Score fields are `Score` values and therefore always in `[0, 10]`.

use crate::model::score::{normalize_score, Score, ScoreInput};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable identifier for a checklist item.
///
/// Derived from the creation timestamp in epoch milliseconds.
pub type ItemId = i64;

/// Returns the image store key for one item.
pub fn image_key(id: ItemId) -> String {
    id.to_string()
}

/// One of the four fixed numeric attributes of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreField {
    #[serde(rename = "scenicScore")]
    Scenic,
    #[serde(rename = "romanceScore")]
    Romance,
    #[serde(rename = "educationalScore")]
    Educational,
    #[serde(rename = "convenienceScore")]
    Convenience,
}

impl ScoreField {
    pub const ALL: [ScoreField; 4] = [
        ScoreField::Scenic,
        ScoreField::Romance,
        ScoreField::Educational,
        ScoreField::Convenience,
    ];

    /// Wire name used in persisted and exported JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scenic => "scenicScore",
            Self::Romance => "romanceScore",
            Self::Educational => "educationalScore",
            Self::Convenience => "convenienceScore",
        }
    }

    /// Short human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Scenic => "scenic",
            Self::Romance => "romance",
            Self::Educational => "educational",
            Self::Convenience => "convenience",
        }
    }
}

impl Display for ScoreField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses a score field from its short label or wire name.
pub fn parse_score_field(value: &str) -> Option<ScoreField> {
    let normalized = value.trim();
    ScoreField::ALL.into_iter().find(|field| {
        field.label().eq_ignore_ascii_case(normalized) || field.as_str() == normalized
    })
}

/// Canonical checklist entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: ItemId,
    pub label: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub scenic_score: Score,
    #[serde(default)]
    pub romance_score: Score,
    #[serde(default)]
    pub educational_score: Score,
    #[serde(default)]
    pub convenience_score: Score,
    /// Bumped whenever the item's image is known to have changed, so views
    /// keyed on `(id, image_version)` refetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_version: Option<u32>,
}

impl ChecklistItem {
    /// Creates an unchecked item with empty notes and zero scores.
    pub fn new(id: ItemId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            checked: false,
            notes: String::new(),
            scenic_score: Score::ZERO,
            romance_score: Score::ZERO,
            educational_score: Score::ZERO,
            convenience_score: Score::ZERO,
            image_version: None,
        }
    }

    pub fn score(&self, field: ScoreField) -> Score {
        match field {
            ScoreField::Scenic => self.scenic_score,
            ScoreField::Romance => self.romance_score,
            ScoreField::Educational => self.educational_score,
            ScoreField::Convenience => self.convenience_score,
        }
    }

    pub fn set_score(&mut self, field: ScoreField, score: Score) {
        let slot = match field {
            ScoreField::Scenic => &mut self.scenic_score,
            ScoreField::Romance => &mut self.romance_score,
            ScoreField::Educational => &mut self.educational_score,
            ScoreField::Convenience => &mut self.convenience_score,
        };
        *slot = score;
    }

    /// Marks the item's image as changed.
    pub fn bump_image_version(&mut self) {
        self.image_version = Some(self.image_version.unwrap_or(0).saturating_add(1));
    }

    pub fn image_key(&self) -> String {
        image_key(self.id)
    }
}

/// Single-field edit applied by id.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Stored raw.
    Label(String),
    /// Stored raw.
    Notes(String),
    /// Re-normalized on commit.
    Score(ScoreField, ScoreInput),
}

impl FieldUpdate {
    /// Applies this update to `item` in place.
    pub fn apply_to(self, item: &mut ChecklistItem) {
        match self {
            Self::Label(label) => item.label = label,
            Self::Notes(notes) => item.notes = notes,
            Self::Score(field, input) => item.set_score(field, normalize_score(input)),
        }
    }

    /// Field name used in diagnostics.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Label(_) => "label",
            Self::Notes(_) => "notes",
            Self::Score(field, _) => field.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_score_field, ChecklistItem, FieldUpdate, ScoreField};
    use serde_json::json;

    #[test]
    fn new_item_has_zero_defaults() {
        let item = ChecklistItem::new(7, "Taipei 101");
        assert!(!item.checked);
        assert!(item.notes.is_empty());
        for field in ScoreField::ALL {
            assert_eq!(item.score(field).value(), 0.0);
        }
        assert_eq!(item.image_version, None);
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let mut item = ChecklistItem::new(1, "Jiufen");
        item.scenic_score = crate::model::score::normalize_score(9.0);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["scenicScore"], json!(9));
        assert_eq!(value["romanceScore"], json!(0));
        assert!(value.get("imageVersion").is_none());

        item.bump_image_version();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["imageVersion"], json!(1));
    }

    #[test]
    fn deserialize_fills_missing_optional_fields() {
        let item: ChecklistItem =
            serde_json::from_value(json!({"id": 3, "label": "Beitou"})).unwrap();
        assert_eq!(item, ChecklistItem::new(3, "Beitou"));
    }

    #[test]
    fn score_update_is_normalized_on_apply() {
        let mut item = ChecklistItem::new(1, "Elephant Mountain");
        FieldUpdate::Score(ScoreField::Romance, "12".into()).apply_to(&mut item);
        assert_eq!(item.romance_score.value(), 10.0);
    }

    #[test]
    fn parses_score_field_names() {
        assert_eq!(parse_score_field("Scenic"), Some(ScoreField::Scenic));
        assert_eq!(
            parse_score_field("convenienceScore"),
            Some(ScoreField::Convenience)
        );
        assert_eq!(parse_score_field("taste"), None);
    }
}
