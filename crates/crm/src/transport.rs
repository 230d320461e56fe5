use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::credential::Credential;

/// One page of a REST query response; rows stay untyped until decoded per source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryPage {
    #[serde(rename = "totalSize", default)]
    pub total_size: u64,
    #[serde(default)]
    pub records: Vec<serde_json::Value>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    #[error("unreadable response: {0}")]
    Decode(String),
}

/// Runs a SOQL query with a credential. Implemented over HTTP by
/// [`RestTransport`]; tests substitute in-memory doubles.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn query(&self, credential: &Credential, soql: &str)
        -> Result<QueryPage, TransportError>;
}

#[derive(Clone)]
pub struct RestTransport {
    http: Client,
    api_version: String,
}

impl RestTransport {
    pub fn new(http: Client, api_version: impl Into<String>) -> Self {
        Self {
            http,
            api_version: api_version.into(),
        }
    }

    pub fn query_url(&self, credential: &Credential) -> String {
        format!(
            "{}/services/data/{}/query/",
            credential.instance_url, self.api_version
        )
    }
}

#[async_trait]
impl QueryTransport for RestTransport {
    async fn query(
        &self,
        credential: &Credential,
        soql: &str,
    ) -> Result<QueryPage, TransportError> {
        let response = self
            .http
            .get(self.query_url(credential))
            .query(&[("q", soql)])
            .header(AUTHORIZATION, credential.authorization_header())
            .send()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;
        serde_json::from_slice(&body).map_err(|err| TransportError::Decode(err.to_string()))
    }
}
