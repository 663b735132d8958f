//! Scan-access token brokering.

use crate::api::RegistryApi;
use crate::error::{AuditError, Result};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Hands out scan-access tokens, exchanging at most once per app per run.
///
/// Tokens are scoped to an application. Caching them by app ID means an
/// image list interleaved across apps costs no extra exchanges, and the
/// broker has no dependency on input ordering.
pub struct TokenBroker<'a> {
    api: &'a dyn RegistryApi,
    tokens: HashMap<String, String>,
}

impl<'a> TokenBroker<'a> {
    pub fn new(api: &'a dyn RegistryApi) -> Self {
        Self {
            api,
            tokens: HashMap::new(),
        }
    }

    /// Token for the given app, exchanging one if none is cached yet. An
    /// exchange failure is fatal to the run.
    pub fn token(&mut self, org_id: &str, app_id: &str) -> Result<String> {
        match self.tokens.entry(app_id.to_string()) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                debug!(org_id, app_id, "exchanging scan token");
                let token = self.api.scan_token(org_id, app_id).map_err(|source| {
                    AuditError::TokenExchange {
                        org_id: org_id.to_string(),
                        app_id: app_id.to_string(),
                        source,
                    }
                })?;
                Ok(entry.insert(token).clone())
            }
        }
    }
}
