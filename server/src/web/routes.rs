// server/src/web/routes.rs

use actix_web::{web, HttpResponse};
use tracing::error;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::product_handlers;

async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  match app_state.store.health_check().await {
    Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
    Err(e) => {
      error!(error = %e, "Health check failed: product store unreachable.");
      HttpResponse::ServiceUnavailable().json(serde_json::json!({ "status": "unavailable" }))
    }
  }
}

/// Registers shared state, extractor error handling and every route.
/// `main.rs` and the HTTP tests both build the app through this.
pub fn configure_app(cfg: &mut web::ServiceConfig, app_state: AppState) {
  let allow_delete_all = app_state.config.allow_delete_all;

  // Malformed bodies and non-UUID ids come out in the same error shape as handler errors.
  // DELETE extracts a plain string, so it never reaches the path handler.
  let json_config = web::JsonConfig::default()
    .error_handler(|err, _req| AppError::Validation(format!("Malformed JSON body: {}", err)).into());
  let path_config = web::PathConfig::default()
    .error_handler(|err, _req| AppError::NotFound(format!("No product at this path: {}", err)).into());

  cfg
    .app_data(web::Data::new(app_state))
    .app_data(json_config)
    .app_data(path_config);
  configure_app_routes(cfg, allow_delete_all);
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig, allow_delete_all: bool) {
  let mut collection = web::resource("")
    .route(web::get().to(product_handlers::list_products_handler))
    .route(web::post().to(product_handlers::create_product_handler));
  if allow_delete_all {
    // Development only: wipes the whole catalog.
    collection = collection.route(web::delete().to(product_handlers::delete_all_products_handler));
  }

  cfg
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/products")
        .service(collection)
        // Registered before "/{product_id}" so "bulk" is never parsed as an id.
        .service(
          web::resource("/bulk")
            .route(web::post().to(product_handlers::create_products_bulk_handler))
            .default_service(web::to(product_handlers::bulk_as_product_id_handler)),
        )
        .service(
          web::resource("/{product_id}")
            .route(web::get().to(product_handlers::get_product_handler))
            .route(web::put().to(product_handlers::update_product_handler))
            .route(web::delete().to(product_handlers::delete_product_handler)),
        ),
    );
}
