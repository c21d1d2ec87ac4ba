use anyhow::Context;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub bucket_name: String,
    pub table_name: String,
    pub presign_expiry_secs: u64,
    pub max_upload_size: u64,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_env("PORT", 5000)?,
            bucket_name: env::var("S3_BUCKET_NAME")
                .unwrap_or_else(|_| "cambio-coding-challenge".into()),
            table_name: env::var("DYNAMODB_TABLE_NAME").unwrap_or_else(|_| "TextScan".into()),
            presign_expiry_secs: parse_env("PRESIGN_EXPIRY_SECS", 3600)?,
            max_upload_size: parse_env("MAX_UPLOAD_SIZE", 104_857_600)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        })
    }

    pub fn presign_expiry(&self) -> Duration {
        Duration::from_secs(self.presign_expiry_secs)
    }
}

fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("{key} must be a number, got {value:?}")),
        Err(_) => Ok(default),
    }
}
