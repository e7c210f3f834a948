use std::sync::Arc;

use log::{debug, warn};

use crate::models::style::{CornerDotType, CornerSquareType, DotType};
use crate::models::suggestion::{RawSuggestion, StyleSuggestion, random_suggestion};
use crate::services::errors::SuggestError;
use crate::services::genai::StyleModel;

// Payload context sent to the model is capped.
const MAX_CONTEXT_CHARS: usize = 500;

/// Produces style suggestions for a payload, from the configured model when
/// possible and from local randomness otherwise.
#[derive(Clone, Default)]
pub struct StyleAdvisor {
    model: Option<Arc<dyn StyleModel>>,
}

impl StyleAdvisor {
    pub fn new(model: Option<Arc<dyn StyleModel>>) -> Self {
        Self { model }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Never fails: any model problem yields a random fallback suggestion.
    pub async fn suggest(&self, payload: &str) -> StyleSuggestion {
        match self.ask_model(payload).await {
            Ok(suggestion) => {
                debug!("Style model suggested mood {:?}", suggestion.mood);
                suggestion
            }
            Err(SuggestError::NotConfigured) => random_suggestion(&mut rand::rng()),
            Err(e) => {
                warn!("Style suggestion fell back to random: {}", e);
                random_suggestion(&mut rand::rng())
            }
        }
    }

    async fn ask_model(&self, payload: &str) -> Result<StyleSuggestion, SuggestError> {
        let model = self.model.as_ref().ok_or(SuggestError::NotConfigured)?;
        let text = model.generate(&build_prompt(payload)).await?;
        parse_suggestion(&text)
    }
}

pub fn build_prompt(payload: &str) -> String {
    let context: String = payload.chars().take(MAX_CONTEXT_CHARS).collect();
    let quoted = |types: &[&str]| {
        types
            .iter()
            .map(|t| format!("\"{}\"", t))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Suggest a visual style for a QR code that encodes the following content:\n\
         {context}\n\n\
         Answer with a single JSON object with the keys primaryColor, secondaryColor, \
         cornerSquareColor, cornerDotColor (each a 6-digit hex color such as \"#1a2b3c\"), \
         dotType (one of {dots}), cornerSquareType (one of {squares}), \
         cornerDotType (one of {corner_dots}), mood (two or three words) and description \
         (one sentence). Keep enough contrast between primaryColor and secondaryColor \
         for scanning.",
        context = context,
        dots = quoted(&DotType::ALL.map(|t| t.as_str())),
        squares = quoted(&CornerSquareType::ALL.map(|t| t.as_str())),
        corner_dots = quoted(&CornerDotType::ALL.map(|t| t.as_str())),
    )
}

/// Parse and validate the model's answer. Tolerates a Markdown code fence
/// around the JSON.
pub fn parse_suggestion(text: &str) -> Result<StyleSuggestion, SuggestError> {
    let trimmed = text.trim();
    let json = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    let raw: RawSuggestion = serde_json::from_str(json.trim())?;
    StyleSuggestion::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::suggestion::SuggestionSource;
    use crate::utils::color::is_hex6_color;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedModel {
        answer: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn answering(answer: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: Ok(answer.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                answer: Err(status),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl StyleModel for ScriptedModel {
        async fn generate(&self, prompt: &str) -> Result<String, SuggestError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.answer {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(SuggestError::Status(*status)),
            }
        }
    }

    fn advisor_with(model: &Arc<ScriptedModel>) -> StyleAdvisor {
        let model: Arc<dyn StyleModel> = model.clone();
        StyleAdvisor::new(Some(model))
    }

    const GOOD: &str = r##"{
        "primaryColor": "#0B3D2E",
        "secondaryColor": "#F1FAEE",
        "cornerSquareColor": "#1D3557",
        "cornerDotColor": "#E63946",
        "dotType": "rounded",
        "cornerSquareType": "dot",
        "cornerDotType": "square",
        "mood": "Fresh Forest",
        "description": "Greens for an outdoor brand."
    }"##;

    fn assert_fallback(s: &StyleSuggestion) {
        assert_eq!(s.source, SuggestionSource::Fallback);
        assert!(is_hex6_color(&s.primary_color));
        assert!(is_hex6_color(&s.corner_dot_color));
        assert!(DotType::ALL.contains(&s.dot_type));
    }

    #[actix_web::test]
    async fn model_answer_is_validated_and_used() {
        let model = ScriptedModel::answering(GOOD);
        let advisor = advisor_with(&model);

        let s = advisor.suggest("https://example.com").await;

        assert_eq!(s.source, SuggestionSource::Model);
        assert_eq!(s.primary_color, "#0b3d2e");
        assert_eq!(s.dot_type, DotType::Rounded);
        assert_eq!(s.corner_square_type, CornerSquareType::Dot);
        assert_eq!(s.mood, "Fresh Forest");
        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("https://example.com"));
    }

    #[actix_web::test]
    async fn fenced_answer_is_accepted() {
        let advisor = advisor_with(&ScriptedModel::answering(&format!("```json\n{}\n```", GOOD)));
        assert_eq!(advisor.suggest("x").await.source, SuggestionSource::Model);
    }

    #[actix_web::test]
    async fn model_failure_falls_back() {
        let advisor = advisor_with(&ScriptedModel::failing(503));
        assert_fallback(&advisor.suggest("x").await);
    }

    #[actix_web::test]
    async fn malformed_json_falls_back() {
        let advisor = advisor_with(&ScriptedModel::answering("not json at all"));
        assert_fallback(&advisor.suggest("x").await);
    }

    #[actix_web::test]
    async fn out_of_set_enum_falls_back() {
        let bad = GOOD.replace("\"rounded\"", "\"hexagon\"");
        let advisor = advisor_with(&ScriptedModel::answering(&bad));
        assert_fallback(&advisor.suggest("x").await);
    }

    #[actix_web::test]
    async fn no_model_goes_straight_to_fallback() {
        let advisor = StyleAdvisor::default();
        assert!(!advisor.has_model());
        assert_fallback(&advisor.suggest("x").await);
    }

    #[test]
    fn prompt_lists_allowed_values_and_caps_context() {
        let long = "a".repeat(2000);
        let prompt = build_prompt(&long);
        assert!(prompt.contains("\"classy-rounded\""));
        assert!(prompt.contains("\"extra-rounded\""));
        assert!(!prompt.contains(&"a".repeat(MAX_CONTEXT_CHARS + 1)));
    }

    #[test]
    fn parse_rejects_missing_keys() {
        let err = parse_suggestion(r##"{"primaryColor": "#000000"}"##).unwrap_err();
        assert!(matches!(err, SuggestError::Malformed(_)));
    }
}
