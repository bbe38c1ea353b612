use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use bouwdesk_core::AppError;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Clone)]
pub struct SmtpRuntimeConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub to_address: String,
}

#[derive(Debug, Clone)]
pub struct WebhookRuntimeConfig {
    pub endpoint: Url,
    pub max_attempts: u8,
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Clone)]
pub enum NotifierConfig {
    Console,
    Smtp(SmtpRuntimeConfig),
    Webhook(WebhookRuntimeConfig),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub bootstrap_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub permission_table_path: Option<String>,
    pub notifier: NotifierConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url = normalize_frontend_url(
            env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_owned())
                .as_str(),
        )?;
        let bootstrap_token = required_non_empty_env("AUTH_BOOTSTRAP_TOKEN")?;

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let permission_table_path = env::var("PERMISSION_TABLE_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let notifier = load_notifier_config(
            env::var("NOTIFIER")
                .unwrap_or_else(|_| "console".to_owned())
                .as_str(),
        )?;

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            bootstrap_token,
            api_host,
            api_port,
            cookie_secure,
            permission_table_path,
            notifier,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

fn load_notifier_config(kind: &str) -> Result<NotifierConfig, AppError> {
    match kind {
        "console" => Ok(NotifierConfig::Console),
        "smtp" => {
            let port = required_non_empty_env("SMTP_PORT")?
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid SMTP_PORT: {error}")))?;
            Ok(NotifierConfig::Smtp(SmtpRuntimeConfig {
                host: required_non_empty_env("SMTP_HOST")?,
                port,
                username: required_non_empty_env("SMTP_USERNAME")?,
                password: required_non_empty_env("SMTP_PASSWORD")?,
                from_address: required_non_empty_env("SMTP_FROM_ADDRESS")?,
                to_address: required_non_empty_env("DECISION_NOTIFY_ADDRESS")?,
            }))
        }
        "webhook" => {
            let raw_endpoint = required_non_empty_env("NOTIFIER_WEBHOOK_URL")?;
            let endpoint = Url::parse(raw_endpoint.as_str()).map_err(|error| {
                AppError::Validation(format!("invalid NOTIFIER_WEBHOOK_URL: {error}"))
            })?;
            if !matches!(endpoint.scheme(), "http" | "https") {
                return Err(AppError::Validation(
                    "NOTIFIER_WEBHOOK_URL must use http or https".to_owned(),
                ));
            }

            let max_attempts = env::var("NOTIFIER_WEBHOOK_MAX_ATTEMPTS")
                .ok()
                .and_then(|value| value.parse::<u8>().ok())
                .unwrap_or(3);
            let retry_backoff_ms = env::var("NOTIFIER_WEBHOOK_RETRY_BACKOFF_MS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(250);

            Ok(NotifierConfig::Webhook(WebhookRuntimeConfig {
                endpoint,
                max_attempts,
                retry_backoff_ms,
            }))
        }
        other => Err(AppError::Validation(format!(
            "NOTIFIER must be one of 'console', 'smtp' or 'webhook', got '{other}'"
        ))),
    }
}

/// Returns the origin form of the frontend URL, without a trailing slash.
fn normalize_frontend_url(value: &str) -> Result<String, AppError> {
    let parsed = Url::parse(value)
        .map_err(|error| AppError::Validation(format!("invalid FRONTEND_URL: {error}")))?;
    if parsed.host_str().is_none() {
        return Err(AppError::Validation(
            "FRONTEND_URL must include a host".to_owned(),
        ));
    }

    Ok(parsed.origin().ascii_serialization())
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{load_notifier_config, normalize_frontend_url};
    use crate::api_config::NotifierConfig;

    #[test]
    fn frontend_url_is_reduced_to_origin() {
        assert_eq!(
            normalize_frontend_url("https://portal.bouwbedrijf.nl/").ok(),
            Some("https://portal.bouwbedrijf.nl".to_owned())
        );
        assert_eq!(
            normalize_frontend_url("http://localhost:3000").ok(),
            Some("http://localhost:3000".to_owned())
        );
        assert!(normalize_frontend_url("not a url").is_err());
    }

    #[test]
    fn console_notifier_needs_no_settings() {
        assert!(matches!(
            load_notifier_config("console"),
            Ok(NotifierConfig::Console)
        ));
        assert!(load_notifier_config("pigeon").is_err());
    }
}
