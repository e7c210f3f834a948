use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::style::{CornerDotType, CornerSquareType, DotType};
use crate::services::errors::SuggestError;
use crate::utils::color::is_hex6_color;

/// Suggestion as returned by the generative model, before validation.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawSuggestion {
    pub primary_color: String,
    pub secondary_color: String,
    pub corner_square_color: String,
    pub corner_dot_color: String,
    pub dot_type: String,
    pub corner_square_type: String,
    pub corner_dot_type: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    Model,
    Fallback,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StyleSuggestion {
    pub primary_color: String,
    pub secondary_color: String,
    pub corner_square_color: String,
    pub corner_dot_color: String,
    pub dot_type: DotType,
    pub corner_square_type: CornerSquareType,
    pub corner_dot_type: CornerDotType,
    pub mood: String,
    pub description: String,
    pub source: SuggestionSource,
    pub created_at: i64, // timestamp in milliseconds
}

impl TryFrom<RawSuggestion> for StyleSuggestion {
    type Error = SuggestError;

    /// All-or-nothing: a single bad color or shape rejects the whole suggestion.
    fn try_from(raw: RawSuggestion) -> Result<Self, Self::Error> {
        let color = |field: &'static str, value: String| {
            if is_hex6_color(&value) {
                Ok(value.to_ascii_lowercase())
            } else {
                Err(SuggestError::InvalidValue { field, value })
            }
        };
        let invalid = |field: &'static str, value: &str| SuggestError::InvalidValue {
            field,
            value: value.to_string(),
        };

        Ok(Self {
            dot_type: DotType::parse(&raw.dot_type)
                .ok_or_else(|| invalid("dotType", &raw.dot_type))?,
            corner_square_type: CornerSquareType::parse(&raw.corner_square_type)
                .ok_or_else(|| invalid("cornerSquareType", &raw.corner_square_type))?,
            corner_dot_type: CornerDotType::parse(&raw.corner_dot_type)
                .ok_or_else(|| invalid("cornerDotType", &raw.corner_dot_type))?,
            primary_color: color("primaryColor", raw.primary_color)?,
            secondary_color: color("secondaryColor", raw.secondary_color)?,
            corner_square_color: color("cornerSquareColor", raw.corner_square_color)?,
            corner_dot_color: color("cornerDotColor", raw.corner_dot_color)?,
            mood: raw.mood,
            description: raw.description,
            source: SuggestionSource::Model,
            created_at: chrono::Utc::now().timestamp_millis(),
        })
    }
}

/// Local stand-in when the model is unavailable: uniform random colors and
/// shapes drawn from the same allowed sets.
pub fn random_suggestion<R: Rng>(rng: &mut R) -> StyleSuggestion {
    let mut color = || format!("#{:06x}", rng.random_range(0..=0x00ff_ffffu32));
    let primary_color = color();
    let secondary_color = color();
    let corner_square_color = color();
    let corner_dot_color = color();

    StyleSuggestion {
        primary_color,
        secondary_color,
        corner_square_color,
        corner_dot_color,
        dot_type: DotType::ALL[rng.random_range(0..DotType::ALL.len())],
        corner_square_type: CornerSquareType::ALL[rng.random_range(0..CornerSquareType::ALL.len())],
        corner_dot_type: CornerDotType::ALL[rng.random_range(0..CornerDotType::ALL.len())],
        mood: String::from("Random"),
        description: String::from("A randomly generated style."),
        source: SuggestionSource::Fallback,
        created_at: chrono::Utc::now().timestamp_millis(),
    }
}
