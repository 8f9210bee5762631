use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    /// Absent means the in-memory backend.
    pub database_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub notify_timeout_secs: u64,
    pub slack_webhook_url: Option<String>,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let host: IpAddr = env_or("HIREFLOW_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid HIREFLOW_HOST: {e}"))?;

        let port: u16 = env_or("HIREFLOW_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid HIREFLOW_PORT: {e}"))?;

        let log_level = env_or("HIREFLOW_LOG_LEVEL", "info");

        let notify_timeout_secs: u64 = env_or("HIREFLOW_NOTIFY_TIMEOUT_SECS", "10")
            .parse()
            .map_err(|e| format!("Invalid HIREFLOW_NOTIFY_TIMEOUT_SECS: {e}"))?;

        let slack_webhook_url = std::env::var("HIREFLOW_SLACK_WEBHOOK_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let smtp = match (
            std::env::var("HIREFLOW_SMTP_HOST").ok(),
            std::env::var("HIREFLOW_SMTP_PORT").ok(),
            std::env::var("HIREFLOW_SMTP_USER").ok(),
            std::env::var("HIREFLOW_SMTP_PASS").ok(),
            std::env::var("HIREFLOW_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid HIREFLOW_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            host,
            port,
            log_level,
            notify_timeout_secs,
            slack_webhook_url,
            smtp,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
