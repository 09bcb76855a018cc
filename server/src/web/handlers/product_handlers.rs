// server/src/web/handlers/product_handlers.rs

use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse};
use naturemate::{NewProduct, Product, ProductPatch};
use serde_json::{json, Map, Value};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::create_product", skip(app_state, payload))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<NewProduct>,
) -> Result<HttpResponse, AppError> {
  let new_product = payload.into_inner();
  new_product.validate()?;

  let product = new_product.into_product(Uuid::new_v4());
  app_state.store.insert(&product).await?;

  info!("Product {} created.", product.id);
  Ok(HttpResponse::Created().json(product))
}

#[instrument(name = "handler::create_products_bulk", skip(app_state, payload), fields(count = payload.len()))]
pub async fn create_products_bulk_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<Vec<NewProduct>>,
) -> Result<HttpResponse, AppError> {
  let new_products = payload.into_inner();
  for (index, new_product) in new_products.iter().enumerate() {
    new_product
      .validate()
      .map_err(|e| AppError::Validation(format!("Product at index {}: {}", index, e)))?;
  }

  let products: Vec<Product> = new_products
    .into_iter()
    .map(|new_product| new_product.into_product(Uuid::new_v4()))
    .collect();
  app_state.store.insert_many(&products).await?;

  info!("Created {} products in one batch.", products.len());
  Ok(HttpResponse::Created().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  let product = app_state.store.get_by_id(product_id).await?;

  info!("Product {} fetched successfully.", product_id);
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.store.get_all().await?;

  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::update_product", skip(app_state, path, payload), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();

  let patch = ProductPatch::from_json(payload.into_inner())?;
  app_state.store.update(product_id, &patch).await?;

  info!(columns = ?patch.changed_fields(), "Product {} updated.", product_id);
  Ok(HttpResponse::Ok().json(json!({
      "message": "Product updated successfully"
  })))
}

/// Takes the raw segment: deleting an id that cannot exist is still a 204.
#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_str()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let Ok(product_id) = Uuid::parse_str(path.as_str()) else {
    debug!("'{}' is not a product id; nothing to delete.", path.as_str());
    return Ok(HttpResponse::NoContent().finish());
  };

  app_state.store.delete(product_id).await?;

  info!("Product {} deleted (or was already absent).", product_id);
  Ok(HttpResponse::NoContent().finish())
}

/// `/products/bulk` under any verb but POST: `bulk` is read as an id that names no product.
#[instrument(name = "handler::bulk_as_product_id", skip(req), fields(method = %req.method()))]
pub async fn bulk_as_product_id_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
  if req.method() == Method::DELETE {
    return Ok(HttpResponse::NoContent().finish());
  }
  Err(AppError::NotFound("Product with ID bulk not found.".to_string()))
}

/// Development only. Routed only when `allow_delete_all` is set.
#[instrument(name = "handler::delete_all_products", skip(app_state))]
pub async fn delete_all_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let removed = app_state.store.delete_all().await?;

  warn!("Deleted all {} products.", removed);
  Ok(HttpResponse::NoContent().finish())
}
