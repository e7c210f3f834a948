use actix_web::{HttpResponse, Responder, Result, error, http::header, web};
use log::{debug, warn};
use validator::Validate;

use crate::models::content::ContentInput;
use crate::models::editor::EditorState;
use crate::state::app_state::AppState;
use crate::structs::qr_request::{CreateQrRequest, PayloadResponse};
use crate::utils::render::{export_filename, render};

/// Encode typed content into its canonical payload string
pub async fn encode_payload(web::Json(content): web::Json<ContentInput>) -> HttpResponse {
    let payload = content.payload();
    debug!("Encoded {} payload ({} bytes)", content.kind(), payload.len());

    HttpResponse::Ok().json(PayloadResponse {
        kind: content.kind().to_string(),
        payload,
    })
}

/// Render typed content as a styled QR code and return it as a download
pub async fn generate_qr(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<CreateQrRequest>,
) -> Result<impl Responder> {
    if let Err(errors) = req.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let size = req.size.unwrap_or(app_state.config.default_qr_size);
    let mut editor = EditorState::default();
    editor.set_content(req.content);
    editor.set_export_format(req.format);
    let logo = req.style.logo.clone();
    editor.set_style(req.style);
    editor.set_logo(logo);
    let payload = editor.payload();
    let format = editor.export_format;
    let filename = export_filename(editor.content.kind(), format);
    debug!(
        "Rendering {} payload ({} bytes) as {} at {}px",
        editor.content.kind(),
        payload.len(),
        format.extension(),
        size
    );

    // Rasterizing is CPU bound; keep it off the worker's event loop
    let style = editor.style;
    let rendered = web::block(move || render(&payload, &style, format, size))
        .await
        .map_err(|e| error::ErrorInternalServerError(format!("Render task failed: {}", e)))?;

    match rendered {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type(format.mime_type())
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ))
            .body(bytes)),
        Err(e) => {
            warn!("QR render rejected: {:#}", e);
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": format!("{:#}", e)
            })))
        }
    }
}
