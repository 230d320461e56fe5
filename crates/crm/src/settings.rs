use std::fmt;

use crate::error::{CrmError, Result};

pub const CLIENT_ID_ENV: &str = "SF_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "SF_CLIENT_SECRET";
pub const USERNAME_ENV: &str = "SF_USERNAME";
pub const PASSWORD_ENV: &str = "SF_PASSWORD";
pub const LOGIN_URL_ENV: &str = "SF_LOGIN_URL";
pub const API_VERSION_ENV: &str = "SF_API_VERSION";

pub const DEFAULT_LOGIN_URL: &str = "https://login.salesforce.com";
pub const DEFAULT_API_VERSION: &str = "v59.0";

/// Connected-app settings. The four secrets stay optional here so that a
/// missing value surfaces per request as a configuration error instead of
/// keeping the server from starting.
#[derive(Clone)]
pub struct CrmSettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub login_url: String,
    pub api_version: String,
}

/// Borrowed view of complete service account settings.
#[derive(Clone, Copy)]
pub struct ServiceAccount<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

impl Default for CrmSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            username: None,
            password: None,
            login_url: DEFAULT_LOGIN_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl CrmSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; empty values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        Self {
            client_id: read(CLIENT_ID_ENV),
            client_secret: read(CLIENT_SECRET_ENV),
            username: read(USERNAME_ENV),
            password: read(PASSWORD_ENV),
            login_url: read(LOGIN_URL_ENV).unwrap_or(defaults.login_url),
            api_version: read(API_VERSION_ENV).unwrap_or(defaults.api_version),
        }
    }

    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            (CLIENT_ID_ENV, &self.client_id),
            (CLIENT_SECRET_ENV, &self.client_secret),
            (USERNAME_ENV, &self.username),
            (PASSWORD_ENV, &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| key)
        .collect()
    }

    pub fn service_account(&self) -> Result<ServiceAccount<'_>> {
        match (
            self.client_id.as_deref(),
            self.client_secret.as_deref(),
            self.username.as_deref(),
            self.password.as_deref(),
        ) {
            (Some(client_id), Some(client_secret), Some(username), Some(password)) => {
                Ok(ServiceAccount {
                    client_id,
                    client_secret,
                    username,
                    password,
                })
            }
            _ => Err(CrmError::Config {
                missing: self.missing_keys(),
            }),
        }
    }
}

fn redacted(value: &Option<String>) -> String {
    match value {
        Some(value) => format!("<{} chars>", value.chars().count()),
        None => "<unset>".to_string(),
    }
}

impl fmt::Debug for CrmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrmSettings")
            .field("client_id", &redacted(&self.client_id))
            .field("client_secret", &redacted(&self.client_secret))
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("login_url", &self.login_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}
