use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::content::ContentInput;
use crate::models::style::StyleConfig;
use crate::models::suggestion::StyleSuggestion;

/// Either an already encoded `payload` or the `content` to encode; `payload`
/// wins when both are sent.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SuggestStyleRequest {
    #[validate(length(max = 8000, message = "Payload is too long"))]
    pub payload: Option<String>,
    pub content: Option<ContentInput>,
    #[serde(default)]
    pub style: StyleConfig,
}

#[derive(Serialize)]
pub struct SuggestStyleResponse {
    pub suggestion: StyleSuggestion,
    /// The submitted style with the suggestion applied.
    pub style: StyleConfig,
}
