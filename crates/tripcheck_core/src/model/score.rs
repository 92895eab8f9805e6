//! Score value type and normalization.
//!
//! # Responsibility
//! - Convert loosely-typed user/import input into a bounded score.
//!
//! # Invariants
//! - A `Score` is always finite and within `[SCORE_MIN, SCORE_MAX]`.
//! - Out-of-range input is clamped to the nearest bound, never rejected.
//! - Fractional input passes through unchanged (no rounding).

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

/// Bounded per-item score.
///
/// Can only be built through [`normalize_score`], including on
/// deserialization, so persisted or imported data is re-normalized on read.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Score(f64);

impl Score {
    pub const ZERO: Score = Score(SCORE_MIN);

    /// Returns the numeric value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns whether the score has no fractional part.
    pub fn is_integral(self) -> bool {
        self.0.fract() == 0.0
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_integral() {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_integral() {
            // Bounded to [0, 10], so the cast is lossless.
            serializer.serialize_u8(self.0 as u8)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Score {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(normalize_score(ScoreInput::from(&raw)))
    }
}

/// Loosely-typed score input as received from editors or import payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreInput {
    Number(f64),
    Text(String),
    Missing,
}

impl From<f64> for ScoreInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for ScoreInput {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for ScoreInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScoreInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<ScoreInput>> From<Option<T>> for ScoreInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

impl From<&serde_json::Value> for ScoreInput {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(number) => {
                number.as_f64().map_or(Self::Missing, Self::Number)
            }
            serde_json::Value::String(text) => Self::Text(text.clone()),
            _ => Self::Missing,
        }
    }
}

/// Normalizes loosely-typed input into a bounded score.
///
/// Text is read as a numeric literal (surrounding whitespace ignored, empty
/// text reads as zero). Anything that does not yield a finite number maps to
/// zero; finite numbers are clamped into `[0, 10]`.
pub fn normalize_score(input: impl Into<ScoreInput>) -> Score {
    let number = match input.into() {
        ScoreInput::Number(value) => value,
        ScoreInput::Text(text) => parse_numeric_text(&text),
        ScoreInput::Missing => f64::NAN,
    };

    if !number.is_finite() {
        return Score::ZERO;
    }

    let clamped = number.clamp(SCORE_MIN, SCORE_MAX);
    // Collapse negative zero so serialization stays canonical.
    if clamped == 0.0 {
        Score::ZERO
    } else {
        Score(clamped)
    }
}

fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::{normalize_score, Score, ScoreInput};
    use serde_json::json;

    #[test]
    fn normalizes_documented_examples() {
        assert_eq!(normalize_score(ScoreInput::Missing).value(), 0.0);
        assert_eq!(normalize_score("abc").value(), 0.0);
        assert_eq!(normalize_score(15.0).value(), 10.0);
        assert_eq!(normalize_score(-3.0).value(), 0.0);
        assert_eq!(normalize_score("7").value(), 7.0);
    }

    #[test]
    fn non_finite_input_maps_to_zero() {
        assert_eq!(normalize_score(f64::NAN), Score::ZERO);
        assert_eq!(normalize_score(f64::INFINITY), Score::ZERO);
        assert_eq!(normalize_score("inf"), Score::ZERO);
    }

    #[test]
    fn fractional_values_pass_through() {
        assert_eq!(normalize_score(4.5).value(), 4.5);
        assert_eq!(normalize_score(" 2.25 ").value(), 2.25);
    }

    #[test]
    fn serializes_integral_scores_as_integers() {
        assert_eq!(serde_json::to_value(normalize_score(7.0)).unwrap(), json!(7));
        assert_eq!(
            serde_json::to_value(normalize_score(7.5)).unwrap(),
            json!(7.5)
        );
        assert_eq!(serde_json::to_value(normalize_score(-0.0)).unwrap(), json!(0));
    }

    #[test]
    fn deserialization_renormalizes() {
        let high: Score = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(high.value(), 10.0);
        let text: Score = serde_json::from_value(json!("3")).unwrap();
        assert_eq!(text.value(), 3.0);
        let junk: Score = serde_json::from_value(json!({"nested": true})).unwrap();
        assert_eq!(junk, Score::ZERO);
    }
}
