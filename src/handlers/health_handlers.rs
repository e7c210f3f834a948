use actix_web::{HttpResponse, web};

use crate::state::app_state::AppState;

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "version": env!("CARGO_PKG_VERSION"),
        "styleModel": state.advisor.has_model()
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::Value;

    use crate::config::app_config::AppConfig;
    use crate::routes::init_routes;
    use crate::services::style_advisor::StyleAdvisor;
    use crate::state::app_state::AppState;

    #[actix_web::test]
    async fn reports_success_and_model_status() {
        let state = web::Data::new(AppState::new(AppConfig::default(), StyleAdvisor::default()));
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;
        let req = test::TestRequest::get().uri("/api/health/check").to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["styleModel"], false);
    }
}
