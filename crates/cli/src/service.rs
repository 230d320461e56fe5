use chrono::{SecondsFormat, Utc};
use journey_core::Journey;
use journey_crm::{CredentialProvider, CrmError, CrmSettings, RecordFetcher, RestTransport};
use journey_protocol::{AuthResponse, JourneyRequest, JourneyResponse};
use reqwest::Client;

/// Runs the credential → fetch → merge → transform pipeline. Holds no
/// per-request state, so one instance serves all requests.
pub struct JourneyService {
    credentials: CredentialProvider,
    fetcher: RecordFetcher<RestTransport>,
}

impl JourneyService {
    pub fn new(settings: CrmSettings, http: Client) -> Self {
        let transport = RestTransport::new(http.clone(), settings.api_version.clone());
        Self {
            credentials: CredentialProvider::new(settings, http),
            fetcher: RecordFetcher::new(transport),
        }
    }

    pub fn settings(&self) -> &CrmSettings {
        self.credentials.settings()
    }

    /// Token exchange outcome as a payload; failures are data, not faults.
    pub async fn authenticate(&self) -> AuthResponse {
        match self.credentials.acquire().await {
            Ok(credential) => AuthResponse::granted(
                credential.access_token,
                credential.instance_url,
                credential.token_type,
            ),
            Err(err) => {
                log::error!("Authentication error: {err}");
                AuthResponse::denied(err.to_string(), now_rfc3339())
            }
        }
    }

    pub async fn build_journey(&self, contact_id: Option<&str>) -> Result<Journey, CrmError> {
        let contact_id = contact_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CrmError::Validation("Contact ID is required".to_string()))?;

        let credential = self.credentials.acquire().await?;
        log::info!("Building journey for contact: {contact_id}");

        let fetched = self.fetcher.fetch(&credential, contact_id).await?;
        let records = journey_core::merge(fetched.batches);
        let journey = journey_core::transform(&records, &fetched.contact);

        log::info!("Generated journey with {} events", journey.events.len());
        Ok(journey)
    }

    pub async fn journey_response(&self, request: &JourneyRequest) -> JourneyResponse {
        match self.build_journey(request.contact_id.as_deref()).await {
            Ok(journey) => JourneyResponse::ok(journey),
            Err(err) => {
                log::error!("Journey generation error: {err}");
                JourneyResponse::failure(err.to_string())
            }
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
