use std::fmt;

use reqwest::Client;
use serde::Deserialize;

use crate::error::{AuthFailure, CrmError, Result};
use crate::settings::CrmSettings;

/// Short-lived access token plus the instance it is valid for.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub token_type: String,
    pub instance_url: String,
}

impl Credential {
    /// Value for the `Authorization` header, e.g. `Bearer 00D...`.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("instance_url", &self.instance_url)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenGrant {
    access_token: String,
    instance_url: String,
    #[serde(default = "default_token_type")]
    token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Deserialize, Default)]
struct TokenRejection {
    error: Option<String>,
    error_description: Option<String>,
}

/// OAuth username-password exchange against the login host.
/// Every call performs a fresh exchange; tokens are never reused.
#[derive(Clone)]
pub struct CredentialProvider {
    settings: CrmSettings,
    http: Client,
}

impl CredentialProvider {
    pub fn new(settings: CrmSettings, http: Client) -> Self {
        Self { settings, http }
    }

    pub fn settings(&self) -> &CrmSettings {
        &self.settings
    }

    pub fn token_url(&self) -> String {
        format!(
            "{}/services/oauth2/token",
            self.settings.login_url.trim_end_matches('/')
        )
    }

    pub async fn acquire(&self) -> Result<Credential> {
        let account = self.settings.service_account()?;

        log::info!(
            "Auth attempt: username={} client_id_len={} secret_len={} password_len={}",
            account.username,
            account.client_id.len(),
            account.client_secret.len(),
            account.password.len()
        );

        let form = [
            ("grant_type", "password"),
            ("client_id", account.client_id),
            ("client_secret", account.client_secret),
            ("username", account.username),
            ("password", account.password),
        ];
        let response = self
            .http
            .post(self.token_url())
            .form(&form)
            .send()
            .await
            .map_err(|err| {
                CrmError::Auth(AuthFailure::Other(format!("token request failed: {err}")))
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            CrmError::Auth(AuthFailure::Other(format!(
                "failed to read token response: {err}"
            )))
        })?;

        if !status.is_success() {
            let rejection: TokenRejection = serde_json::from_slice(&body).unwrap_or_default();
            log::error!(
                "Salesforce auth rejected: status={} error={} description={}",
                status,
                rejection.error.as_deref().unwrap_or("-"),
                rejection.error_description.as_deref().unwrap_or("-")
            );
            return Err(CrmError::Auth(AuthFailure::from_upstream(
                rejection.error.as_deref(),
                rejection.error_description.as_deref(),
            )));
        }

        let grant: TokenGrant = serde_json::from_slice(&body).map_err(|err| {
            CrmError::Auth(AuthFailure::Other(format!(
                "unreadable token response: {err}"
            )))
        })?;

        log::info!("Salesforce authentication successful");
        Ok(Credential {
            access_token: grant.access_token,
            token_type: grant.token_type,
            instance_url: grant.instance_url.trim_end_matches('/').to_string(),
        })
    }
}
