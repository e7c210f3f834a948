use actix_web::{HttpResponse, error, web};

use crate::handlers::health_handlers::health_check;
use crate::handlers::qr_handlers::{encode_payload, generate_qr};
use crate::handlers::style_handlers::suggest_style;

// Room for an embedded logo sent as base64.
const JSON_LIMIT: usize = 4 * 1024 * 1024;

/// Malformed or unknown-type bodies get the same `{"error": ...}` shape as
/// the handlers' own rejections.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            let message = err.to_string();
            error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(serde_json::json!({ "error": message })),
            )
            .into()
        })
}

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());
    cfg.service(
        web::scope("/api")
            .route("/health/check", web::get().to(health_check))
            .route("/payload", web::post().to(encode_payload))
            .route("/qr", web::post().to(generate_qr))
            .route("/style/suggest", web::post().to(suggest_style)),
    );
}
