// server/src/main.rs

use actix_cors::Cors;
use actix_web::{App, HttpServer};
use naturemate_server::config::{AppConfig, LogFormat};
use naturemate_server::state::AppState;
use naturemate_server::web::configure_app;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")); // Allow RUST_LOG override
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Config comes first so LOG_FORMAT can shape the subscriber; errors before that go to stderr.
  let app_config = Arc::new(AppConfig::from_env()?);
  init_tracing(app_config.log_format);

  tracing::info!("Starting NatureMate catalog server...");
  tracing::info!(
    env = ?app_config.app_env,
    store = ?app_config.store_backend,
    database = ?app_config.database,
    "Application configuration loaded."
  );
  if app_config.allow_delete_all {
    tracing::warn!("DELETE /products is enabled. Do not run this configuration in production.");
  }

  let app_state = match AppState::from_config(app_config.clone()).await {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialize the product store.");
      return Err(e.into());
    }
  };

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    let app_state = app_state.clone();
    App::new()
      .wrap(Cors::permissive())
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(move |cfg| configure_app(cfg, app_state))
  })
  .bind(&server_address)?
  .run()
  .await?;

  tracing::info!("Server stopped.");
  Ok(())
}
