use std::time::{SystemTime, UNIX_EPOCH};

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use log::{debug, error, info};
use serde_json::json;

use crate::interfaces::subconverter;
use crate::models::AppState;
use crate::utils::SubscriptionFetcher;

/// Content type of the generated document
pub const YAML_CONTENT_TYPE: &str = "application/x-yaml";
/// Suggested download name of the generated document
pub const OUTPUT_FILENAME: &str = "out.yaml";

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Handler for `GET /health`
pub async fn health_handler<F: SubscriptionFetcher + 'static>(
    app_state: web::Data<AppState<F>>,
) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": unix_timestamp(),
        "config": app_state.config.url,
    }))
}

/// Handler for `GET /config`
///
/// Success returns the YAML document as a download; any pipeline failure
/// returns a JSON error body and nothing else.
pub async fn config_handler<F: SubscriptionFetcher + 'static>(
    app_state: web::Data<AppState<F>>,
) -> HttpResponse {
    debug!("Received config request");
    let config = app_state.subconverter_config();

    match subconverter(&config, &app_state.fetcher).await {
        Ok(result) => {
            info!(
                "Serving {} proxies ({} links skipped)",
                result.node_count, result.skipped
            );
            HttpResponse::Ok()
                .content_type(YAML_CONTENT_TYPE)
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", OUTPUT_FILENAME),
                ))
                .body(result.content)
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Register the conversion routes
pub fn config<F: SubscriptionFetcher + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_handler::<F>))
        .route("/config", web::get().to(config_handler::<F>));
}
