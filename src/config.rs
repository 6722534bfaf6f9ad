use std::net::IpAddr;
use std::path::PathBuf;

use crate::frontpage::FrontpageConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub admin_token: String,
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub max_body_size: usize,
    pub upload_dir: PathBuf,
    pub frontpage: FrontpageConfig,
    /// Seconds between packet expiry sweeps. Zero disables the sweeper.
    pub packet_sweep_secs: u64,
    pub log_level: String,
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
        let database_url = env_required("DATABASE_URL")?;
        let admin_token = env_required("MEMBERWEB_ADMIN_TOKEN")?;
        if admin_token.len() < 16 {
            return Err("MEMBERWEB_ADMIN_TOKEN must be at least 16 characters".to_string());
        }

        let host: IpAddr = env_or("MEMBERWEB_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid MEMBERWEB_HOST: {e}"))?;

        let port: u16 = env_or("MEMBERWEB_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid MEMBERWEB_PORT: {e}"))?;

        let base_url = env_or("MEMBERWEB_BASE_URL", &format!("http://{host}:{port}"));

        let max_body_size: usize = env_or("MEMBERWEB_MAX_BODY_SIZE", "10485760")
            .parse()
            .map_err(|e| format!("Invalid MEMBERWEB_MAX_BODY_SIZE: {e}"))?;

        let upload_dir = PathBuf::from(env_or("MEMBERWEB_UPLOAD_DIR", "uploads"));

        let news_count: usize = env_or("MEMBERWEB_NEWS_COUNT", "6")
            .parse()
            .map_err(|e| format!("Invalid MEMBERWEB_NEWS_COUNT: {e}"))?;

        let activity_count: usize = env_or("MEMBERWEB_ACTIVITY_COUNT", "6")
            .parse()
            .map_err(|e| format!("Invalid MEMBERWEB_ACTIVITY_COUNT: {e}"))?;

        let packet_sweep_secs: u64 = env_or("MEMBERWEB_PACKET_SWEEP_SECS", "3600")
            .parse()
            .map_err(|e| format!("Invalid MEMBERWEB_PACKET_SWEEP_SECS: {e}"))?;

        let log_level = env_or("MEMBERWEB_LOG_LEVEL", "info");

        let smtp = match (
            std::env::var("MEMBERWEB_SMTP_HOST").ok(),
            std::env::var("MEMBERWEB_SMTP_PORT").ok(),
            std::env::var("MEMBERWEB_SMTP_USER").ok(),
            std::env::var("MEMBERWEB_SMTP_PASS").ok(),
            std::env::var("MEMBERWEB_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid MEMBERWEB_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            admin_token,
            host,
            port,
            base_url,
            max_body_size,
            upload_dir,
            frontpage: FrontpageConfig {
                news_count,
                activity_count,
            },
            packet_sweep_secs,
            log_level,
            smtp,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
