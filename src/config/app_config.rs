use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

use crate::models::style::{MAX_QR_SIZE, MIN_QR_SIZE};

pub const DEFAULT_GENAI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GENAI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenAiConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub default_qr_size: u32,
    /// `None` when no API key is set; suggestions then always use the fallback.
    pub genai: Option<GenAiConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: String::from("127.0.0.1"),
            port: 8080,
            allowed_origins: vec![
                String::from("http://localhost:5173"),
                String::from("http://localhost:4173"),
            ],
            default_qr_size: 512,
            genai: None,
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let genai = match var("GENAI_API_KEY") {
            Some(api_key) => Some(GenAiConfig {
                api_url: var("GENAI_API_URL").unwrap_or_else(|| DEFAULT_GENAI_URL.to_string()),
                api_key,
                model: var("GENAI_MODEL").unwrap_or_else(|| DEFAULT_GENAI_MODEL.to_string()),
                timeout_secs: parse_or(var("GENAI_TIMEOUT_SECS"), "GENAI_TIMEOUT_SECS", 10)?,
            }),
            None => None,
        };

        let allowed_origins = match var("ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.allowed_origins,
        };

        let default_qr_size = parse_or(
            var("DEFAULT_QR_SIZE"),
            "DEFAULT_QR_SIZE",
            defaults.default_qr_size,
        )?;
        if !(MIN_QR_SIZE..=MAX_QR_SIZE).contains(&default_qr_size) {
            bail!(
                "DEFAULT_QR_SIZE must be between {} and {}, got {}",
                MIN_QR_SIZE,
                MAX_QR_SIZE,
                default_qr_size
            );
        }

        Ok(Self {
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: parse_or(var("PORT"), "PORT", defaults.port)?,
            allowed_origins,
            default_qr_size,
            genai,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{} must be a number, got {:?}", key, raw)),
        None => Ok(default),
    }
}
