use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use server_api::DEFAULT_MAX_PAGE_SIZE;

pub const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub log_filter: String,
    pub max_page_size: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8443".into(),
            log_filter: "info".into(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if Path::new(SETTINGS_FILE).exists() {
        let raw = fs::read_to_string(SETTINGS_FILE)
            .with_context(|| format!("failed to read '{SETTINGS_FILE}'"))?;
        apply_file_overrides(&mut settings, &raw)
            .with_context(|| format!("failed to parse '{SETTINGS_FILE}'"))?;
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Ok(v) = std::env::var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Ok(v) = std::env::var("APP__MAX_PAGE_SIZE") {
        settings.max_page_size = parse_page_size(&v)?;
    }

    Ok(settings)
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(raw)?;

    if let Some(v) = file_cfg.get("bind_addr").and_then(toml::Value::as_str) {
        settings.server_bind = v.to_string();
    }
    if let Some(v) = file_cfg.get("log_filter").and_then(toml::Value::as_str) {
        settings.log_filter = v.to_string();
    }
    if let Some(v) = file_cfg.get("max_page_size") {
        settings.max_page_size = match v {
            toml::Value::Integer(n) => u64::try_from(*n)
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("max_page_size must be positive, got {n}"))?,
            toml::Value::String(s) => parse_page_size(s)?,
            other => anyhow::bail!("max_page_size must be an integer, got {other}"),
        };
    }

    Ok(())
}

fn parse_page_size(raw: &str) -> anyhow::Result<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .with_context(|| format!("max_page_size must be a positive integer, got '{raw}'"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
