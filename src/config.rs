//! Configuration loading and resolution.
//!
//! Settings come from three layers, highest priority first:
//! 1. CLI flags (`--api-url`, `--auth-token`)
//! 2. Environment (`REG_AUDIT_API_URL`, `REG_AUDIT_TOKEN`)
//! 3. Config file (`.reg-audit.yaml`)
//!
//! `api_url` and `auth_token` are required after resolution; `timeout_secs`
//! falls back to a default.

use crate::error::{AuditError, Result};
use serde::Deserialize;
use std::path::Path;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".reg-audit.yaml";

/// Environment variable for the platform API base URL.
pub const API_URL_ENV: &str = "REG_AUDIT_API_URL";

/// Environment variable for the platform API auth token.
pub const AUTH_TOKEN_ENV: &str = "REG_AUDIT_TOKEN";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings read from `.reg-audit.yaml`. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub auth_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load a config file. Returns `Ok(None)` if the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| AuditError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let config =
            serde_yaml::from_str(&content).map_err(|source| AuditError::ConfigParse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Some(config))
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub api_url: String,
    pub auth_token: String,
    pub timeout_secs: u64,
}

impl EffectiveConfig {
    /// Resolve configuration from CLI flags, the process environment, and an
    /// optional config file.
    pub fn resolve(
        api_url_flag: Option<&str>,
        auth_token_flag: Option<&str>,
        file: Option<FileConfig>,
    ) -> Result<Self> {
        Self::resolve_from(
            api_url_flag,
            auth_token_flag,
            std::env::var(API_URL_ENV).ok(),
            std::env::var(AUTH_TOKEN_ENV).ok(),
            file,
        )
    }

    fn resolve_from(
        api_url_flag: Option<&str>,
        auth_token_flag: Option<&str>,
        api_url_env: Option<String>,
        auth_token_env: Option<String>,
        file: Option<FileConfig>,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();

        let api_url = api_url_flag
            .map(str::to_string)
            .or(api_url_env)
            .or(file.api_url)
            .ok_or_else(|| {
                AuditError::Config(format!(
                    "no API URL: set --api-url, {API_URL_ENV}, or api_url in {CONFIG_FILE_NAME}"
                ))
            })?;

        let auth_token = auth_token_flag
            .map(str::to_string)
            .or(auth_token_env)
            .or(file.auth_token)
            .ok_or_else(|| {
                AuditError::Config(format!(
                    "no auth token: set --auth-token, {AUTH_TOKEN_ENV}, or auth_token in {CONFIG_FILE_NAME}"
                ))
            })?;

        Ok(Self {
            // A trailing slash would double up when joining endpoint paths.
            api_url: api_url.trim_end_matches('/').to_string(),
            auth_token,
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}
