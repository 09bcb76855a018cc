// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use sqlx::postgres::PgConnectOptions;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
  Development,
  Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres,
  Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

/// Connection settings for the PostgreSQL store.
#[derive(Clone)]
pub struct DatabaseConfig {
  /// Full connection string. When set, the individual parts are ignored.
  pub url: Option<String>,
  pub user: String,
  pub password: String,
  pub host: String,
  pub port: u16,
  pub name: String,
  pub max_connections: u32,
  pub init_schema: bool,
}

impl DatabaseConfig {
  pub fn connect_options(&self) -> Result<PgConnectOptions> {
    match &self.url {
      Some(url) => url
        .parse::<PgConnectOptions>()
        .map_err(|e| AppError::Config(format!("Invalid DATABASE_URL: {}", e))),
      None => Ok(
        PgConnectOptions::new()
          .host(&self.host)
          .port(self.port)
          .username(&self.user)
          .password(&self.password)
          .database(&self.name),
      ),
    }
  }

  /// Connection target without credentials, for logs.
  pub fn redacted(&self) -> String {
    match &self.url {
      Some(_) => "DATABASE_URL=[REDACTED]".to_string(),
      None => format!("{}@{}:{}/{}", self.user, self.host, self.port, self.name),
    }
  }
}

// Manual impl keeps the password out of `{:?}` output.
impl std::fmt::Debug for DatabaseConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DatabaseConfig")
      .field("target", &self.redacted())
      .field("max_connections", &self.max_connections)
      .field("init_schema", &self.init_schema)
      .finish()
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub app_env: AppEnv,
  /// Registers `DELETE /products`.
  pub allow_delete_all: bool,
  pub store_backend: StoreBackend,
  /// Present when `store_backend` is `Postgres`.
  pub database: Option<DatabaseConfig>,
  pub log_format: LogFormat,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|var_name| env::var(var_name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the process environment.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_env = |var_name: &str| {
      lookup(var_name)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };
    let parse_bool = |var_name: &str, value: String| {
      value
        .trim()
        .to_ascii_lowercase()
        .parse::<bool>()
        .map_err(|e| AppError::Config(format!("Invalid {} value: {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let app_env = match get_env("APP_ENV")
      .unwrap_or_else(|_| "production".to_string())
      .to_ascii_lowercase()
      .as_str()
    {
      "development" | "dev" => AppEnv::Development,
      "production" | "prod" => AppEnv::Production,
      other => return Err(AppError::Config(format!("Invalid APP_ENV: '{}'", other))),
    };

    let allow_delete_all = match get_env("ALLOW_DELETE_ALL") {
      Ok(value) => parse_bool("ALLOW_DELETE_ALL", value)?,
      Err(_) => app_env == AppEnv::Development,
    };

    let store_backend = match get_env("PRODUCT_STORE")
      .unwrap_or_else(|_| "postgres".to_string())
      .to_ascii_lowercase()
      .as_str()
    {
      "postgres" => StoreBackend::Postgres,
      "memory" => StoreBackend::Memory,
      other => return Err(AppError::Config(format!("Invalid PRODUCT_STORE: '{}'", other))),
    };

    let database = match store_backend {
      StoreBackend::Memory => None,
      StoreBackend::Postgres => {
        let url = get_env("DATABASE_URL").ok();
        // The parts are only mandatory when no full URL was given.
        let required = |var_name: &str| match &url {
          Some(_) => Ok(get_env(var_name).unwrap_or_default()),
          None => get_env(var_name),
        };
        let port = get_env("DB_PORT")
          .unwrap_or_else(|_| "5432".to_string())
          .parse::<u16>()
          .map_err(|e| AppError::Config(format!("Invalid DB_PORT: {}", e)))?;
        let max_connections = get_env("DB_MAX_CONNECTIONS")
          .unwrap_or_else(|_| "10".to_string())
          .parse::<u32>()
          .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;
        let init_schema = match get_env("DB_INIT_SCHEMA") {
          Ok(value) => parse_bool("DB_INIT_SCHEMA", value)?,
          Err(_) => false,
        };

        Some(DatabaseConfig {
          user: required("DB_USER")?,
          password: lookup("DB_PASSWORD").unwrap_or_default(),
          host: get_env("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
          port,
          name: required("DB_NAME")?,
          url,
          max_connections,
          init_schema,
        })
      }
    };

    let log_format = match get_env("LOG_FORMAT")
      .unwrap_or_else(|_| "pretty".to_string())
      .to_ascii_lowercase()
      .as_str()
    {
      "pretty" => LogFormat::Pretty,
      "json" => LogFormat::Json,
      other => return Err(AppError::Config(format!("Invalid LOG_FORMAT: '{}'", other))),
    };

    Ok(Self {
      server_host,
      server_port,
      app_env,
      allow_delete_all,
      store_backend,
      database,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
