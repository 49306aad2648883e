use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use client_core::DEFAULT_ADAMA_URL;
use serde::Deserialize;
use shared::domain::{ServiceRef, DEFAULT_NAMESPACE, DEFAULT_SERVICE};

pub const SETTINGS_FILE: &str = "portal.toml";

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub adama_base_url: String,
    pub adama_token: Option<String>,
    pub namespace: String,
    pub service: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            adama_base_url: DEFAULT_ADAMA_URL.into(),
            adama_token: None,
            namespace: DEFAULT_NAMESPACE.into(),
            service: DEFAULT_SERVICE.into(),
        }
    }
}

impl Settings {
    pub fn service_ref(&self) -> ServiceRef {
        ServiceRef::new(&self.namespace, &self.service)
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if Path::new(SETTINGS_FILE).exists() {
        let raw = fs::read_to_string(SETTINGS_FILE)
            .with_context(|| format!("failed to read {SETTINGS_FILE}"))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse {SETTINGS_FILE}"))?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, String>>(raw)?;
    if let Some(v) = file_cfg.get("bind_addr") {
        settings.server_bind = v.clone();
    }
    if let Some(v) = file_cfg.get("adama_url") {
        settings.adama_base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("adama_token") {
        settings.adama_token = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("namespace") {
        settings.namespace = v.clone();
    }
    if let Some(v) = file_cfg.get("service") {
        settings.service = v.clone();
    }
    Ok(())
}

/// Later keys win, so the `APP__` spelling overrides the short one.
fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    for key in ["PORTAL_BIND", "APP__BIND_ADDR"] {
        if let Some(v) = var(key) {
            settings.server_bind = v;
        }
    }
    for key in ["ADAMA_URL", "APP__ADAMA_URL"] {
        if let Some(v) = var(key) {
            settings.adama_base_url = v;
        }
    }
    for key in ["ADAMA_TOKEN", "APP__ADAMA_TOKEN"] {
        if let Some(v) = var(key) {
            settings.adama_token = Some(v);
        }
    }
    if let Some(v) = var("APP__NAMESPACE") {
        settings.namespace = v;
    }
    if let Some(v) = var("APP__SERVICE") {
        settings.service = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
