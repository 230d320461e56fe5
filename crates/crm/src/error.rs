use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrmError>;

/// Why the token exchange was rejected, with the hint shown to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("Invalid username, password, or security token. Make sure your password includes the security token at the end.")]
    InvalidGrant,

    #[error("Invalid Client ID. Check your Connected App settings.")]
    InvalidClientId,

    #[error("Invalid Client Secret. Check your Connected App settings.")]
    InvalidClientSecret,

    #[error("{0}")]
    Other(String),
}

impl AuthFailure {
    /// Classifies the OAuth `error` / `error_description` pair.
    pub fn from_upstream(error: Option<&str>, description: Option<&str>) -> Self {
        match error {
            Some("invalid_grant") => Self::InvalidGrant,
            Some("invalid_client_id") => Self::InvalidClientId,
            Some("invalid_client") => Self::InvalidClientSecret,
            _ => Self::Other(
                description
                    .or(error)
                    .unwrap_or("unknown error")
                    .to_string(),
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("Missing Salesforce environment variables: {}", .missing.join(", "))]
    Config { missing: Vec<&'static str> },

    #[error("Salesforce authentication failed: {0}")]
    Auth(AuthFailure),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Contact lookup failed: {0}")]
    Query(String),
}
