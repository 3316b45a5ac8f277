//! Configuration module
//!
//! Env-based configuration for the content service: server settings, storage
//! backend selection, and bucket addressing. Values are read once at startup
//! via `Config::from_env` and shared immutably across requests.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_BUCKET_PREFIX: &str = "stowage-ws";

/// Service configuration, loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    cors_origins: Vec<String>,
    environment: String,
    storage_backend: Option<StorageBackend>,
    /// Prefix for per-owner bucket names; bucket for owner `o` is
    /// `{bucket_prefix}-{o}`.
    bucket_prefix: String,
    s3_region: Option<String>,
    s3_endpoint: Option<String>,
    aws_region: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
            .parse::<u16>()
            .unwrap_or(DEFAULT_SERVER_PORT);

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .map(|s| StorageBackend::from_str(&s))
            .transpose()?;

        let bucket_prefix =
            env::var("BUCKET_PREFIX").unwrap_or_else(|_| DEFAULT_BUCKET_PREFIX.to_string());
        if bucket_prefix.trim().is_empty() {
            return Err(anyhow::anyhow!("BUCKET_PREFIX cannot be empty"));
        }

        Ok(Config {
            server_port,
            cors_origins,
            environment,
            storage_backend,
            bucket_prefix,
            s3_region: env::var("S3_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            aws_region: env::var("AWS_REGION").ok(),
        })
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.storage_backend
    }

    pub fn bucket_prefix(&self) -> &str {
        &self.bucket_prefix
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.aws_region.as_deref()
    }

    /// Construct a config directly, bypassing the environment. Intended for
    /// tests and embedding.
    pub fn for_testing(backend: StorageBackend, bucket_prefix: impl Into<String>) -> Self {
        Config {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
            storage_backend: Some(backend),
            bucket_prefix: bucket_prefix.into(),
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
        }
    }
}
