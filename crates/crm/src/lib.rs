//! Salesforce side of the journey pipeline.
//!
//! [`CredentialProvider`] trades the service account settings for a
//! short-lived [`Credential`]; [`RecordFetcher`] resolves the contact and fans
//! out the three activity source queries over a [`QueryTransport`], skipping
//! any source that fails.

mod credential;
mod error;
mod fetcher;
mod rows;
mod settings;
pub mod soql;
mod transport;

pub use credential::{Credential, CredentialProvider};
pub use error::{AuthFailure, CrmError, Result};
pub use fetcher::{FetchedActivity, RecordFetcher, SourceKind, SourceReport, SourceStatus};
pub use settings::{
    CrmSettings, ServiceAccount, API_VERSION_ENV, CLIENT_ID_ENV, CLIENT_SECRET_ENV,
    DEFAULT_API_VERSION, DEFAULT_LOGIN_URL, LOGIN_URL_ENV, PASSWORD_ENV, USERNAME_ENV,
};
pub use transport::{QueryPage, QueryTransport, RestTransport, TransportError};
