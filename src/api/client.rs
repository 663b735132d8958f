//! Blocking HTTP client for the platform API.

use crate::api::error::ApiError;
use crate::api::types::{AppSummary, ImageQuery, MachineSummary, TokenRequest, TokenResponse};
use crate::api::RegistryApi;
use crate::config::EffectiveConfig;
use crate::error::{AuditError, Result};
use crate::retry::{Backoff, retry};
use crate::scan::types::{ImageRef, Scan};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Machine state that counts as running for the `--running` filter.
const RUNNING_STATE: &str = "started";

pub struct HttpRegistryApi {
    client: Client,
    api_url: String,
    auth_token: String,
    backoff: Backoff,
}

impl HttpRegistryApi {
    pub fn new(config: &EffectiveConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("reg-audit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AuditError::Client)?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            auth_token: config.auth_token.clone(),
            backoff: Backoff::default(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> std::result::Result<T, ApiError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.auth_token)
            .send()?;
        let response = check_status(response, url)?;
        Ok(response.json()?)
    }

    fn get_app(&self, name: &str) -> std::result::Result<AppSummary, ApiError> {
        self.get_json(&format!("{}/v1/apps/{name}", self.api_url))
    }

    fn org_apps(&self, org: &str) -> std::result::Result<Vec<AppSummary>, ApiError> {
        self.get_json(&format!("{}/v1/orgs/{org}/apps", self.api_url))
    }

    fn app_machines(&self, app: &str) -> std::result::Result<Vec<MachineSummary>, ApiError> {
        self.get_json(&format!("{}/v1/apps/{app}/machines", self.api_url))
    }

    fn request_token(
        &self,
        org_id: &str,
        app_id: &str,
    ) -> std::result::Result<String, ApiError> {
        let url = format!("{}/v1/tokens/scan", self.api_url);
        debug!(url, app_id, "POST");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.auth_token)
            .json(&TokenRequest { org_id, app_id })
            .send()?;
        let response = check_status(response, &url)?;
        let token: TokenResponse = response.json()?;
        Ok(token.token)
    }

    fn request_scan(&self, path: &str, token: &str) -> std::result::Result<Scan, ApiError> {
        let url = format!("{}/v1/scans/{path}", self.api_url);
        debug!(url, "GET");
        let response = self.client.get(&url).bearer_auth(token).send()?;
        // The scan service answers 422 for registries and image formats it
        // cannot scan; that is a per-image skip, not a failure.
        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(ApiError::UnsupportedRepository(path.to_string()));
        }
        let response = check_status(response, &url)?;
        Ok(response.json()?)
    }
}

impl RegistryApi for HttpRegistryApi {
    fn list_images(&self, query: &ImageQuery) -> std::result::Result<Vec<ImageRef>, ApiError> {
        let mut apps = match (&query.app, &query.org) {
            (Some(app), _) => vec![self.get_app(app)?],
            (None, Some(org)) => self.org_apps(org)?,
            (None, None) => {
                return Err(ApiError::InvalidQuery(
                    "either an app or an org must be specified".to_string(),
                ));
            }
        };
        apps.sort_by(|a, b| {
            (a.organization.slug.as_str(), a.name.as_str())
                .cmp(&(b.organization.slug.as_str(), b.name.as_str()))
        });

        let mut images = Vec::new();
        for app in &apps {
            let mut machines = self.app_machines(&app.name)?;
            machines.sort_by(|a, b| a.id.cmp(&b.id));
            for machine in machines {
                if machine.image_ref.is_empty() {
                    continue;
                }
                if query.running_only && !machine_is_running(&machine.state) {
                    continue;
                }
                images.push(ImageRef {
                    org_id: app.organization.id.clone(),
                    org: app.organization.slug.clone(),
                    app_id: app.id.clone(),
                    app: app.name.clone(),
                    machine: machine.id,
                    path: machine.image_ref,
                });
            }
        }
        Ok(images)
    }

    fn scan_token(&self, org_id: &str, app_id: &str) -> std::result::Result<String, ApiError> {
        retry(&self.backoff, ApiError::is_retryable, || {
            self.request_token(org_id, app_id)
        })
    }

    fn fetch_scan(&self, path: &str, token: &str) -> std::result::Result<Scan, ApiError> {
        retry(&self.backoff, ApiError::is_retryable, || {
            self.request_scan(path, token)
        })
    }
}

fn machine_is_running(state: &str) -> bool {
    state == RUNNING_STATE
}

/// Map non-2xx responses onto the error taxonomy.
fn check_status(response: Response, url: &str) -> std::result::Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().unwrap_or_default();
    match status.as_u16() {
        401 | 403 => Err(ApiError::Auth {
            status: status.as_u16(),
            message,
        }),
        404 => Err(ApiError::NotFound {
            url: url.to_string(),
        }),
        504 => Err(ApiError::GatewayTimeout {
            url: url.to_string(),
        }),
        _ => Err(ApiError::Http {
            status: status.as_u16(),
            url: url.to_string(),
            message,
        }),
    }
}
