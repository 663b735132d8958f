use serde::{Deserialize, Serialize};

/// Scope of an image listing: a single app, or every app in an org.
#[derive(Debug, Clone, Default)]
pub struct ImageQuery {
    pub org: Option<String>,
    pub app: Option<String>,
    /// Only include images used by machines in the `started` state.
    pub running_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgSummary {
    pub id: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSummary {
    pub id: String,
    pub name: String,
    pub organization: OrgSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSummary {
    pub id: String,
    pub name: String,
    pub state: String,
    /// Full image path, e.g. `registry.example.com/acme/api@sha256:...`.
    /// Empty for machines without a resolved image.
    #[serde(default)]
    pub image_ref: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub org_id: &'a str,
    pub app_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_query_default_is_unscoped() {
        let query = ImageQuery::default();
        assert!(query.org.is_none());
        assert!(query.app.is_none());
        assert!(!query.running_only);
    }

    #[test]
    fn test_machine_summary_missing_image_ref_defaults_empty() {
        let machine: MachineSummary = serde_json::from_str(
            r#"{"id": "m1", "name": "lingering-snow-1", "state": "stopped"}"#,
        )
        .unwrap();
        assert!(machine.image_ref.is_empty());
    }

    #[test]
    fn test_token_response_deserializes() {
        let resp: TokenResponse = serde_json::from_str(r#"{"token": "tok_abc"}"#).unwrap();
        assert_eq!(resp.token, "tok_abc");
    }
}
