use actix_web::{HttpResponse, Responder, Result, web};
use log::debug;
use validator::Validate;

use crate::models::editor::EditorState;
use crate::state::app_state::AppState;
use crate::structs::style_request::{SuggestStyleRequest, SuggestStyleResponse};

/// Suggest a style for the given payload. Always answers 200; model
/// failures are replaced by a random style.
pub async fn suggest_style(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<SuggestStyleRequest>,
) -> Result<impl Responder> {
    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let mut editor = EditorState::default();
    editor.set_style(req.style);
    if let Some(content) = req.content {
        editor.set_content(content);
    }
    let payload = req.payload.unwrap_or_else(|| editor.payload());

    let suggestion = app_state.advisor.suggest(&payload).await;
    debug!("Suggested {:?} style ({:?})", suggestion.mood, suggestion.source);
    editor.apply_suggestion(&suggestion);

    Ok(HttpResponse::Ok().json(SuggestStyleResponse {
        suggestion,
        style: editor.style,
    }))
}
