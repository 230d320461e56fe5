use std::fmt;

use journey_core::{ActivityRecord, Contact};

use crate::credential::Credential;
use crate::error::{CrmError, Result};
use crate::rows::{decode_records, ContactRow};
use crate::soql;
use crate::transport::QueryTransport;

/// The three independent activity sources queried per journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Tasks,
    Events,
    EmailMessages,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [Self::Tasks, Self::Events, Self::EmailMessages];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Events => "events",
            Self::EmailMessages => "email_messages",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Fetched(usize),
    Skipped(String),
}

/// Outcome of one source query; a skip never fails the fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub source: SourceKind,
    pub status: SourceStatus,
}

impl SourceReport {
    pub fn is_skipped(&self) -> bool {
        matches!(self.status, SourceStatus::Skipped(_))
    }
}

#[derive(Debug, Clone)]
pub struct FetchedActivity {
    pub contact: Contact,
    /// Records per succeeding source, in [`SourceKind::ALL`] order.
    pub batches: Vec<Vec<ActivityRecord>>,
    /// One entry per source, in [`SourceKind::ALL`] order.
    pub reports: Vec<SourceReport>,
}

impl FetchedActivity {
    pub fn record_count(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    pub fn all_sources_skipped(&self) -> bool {
        self.reports.iter().all(SourceReport::is_skipped)
    }

    /// Contact plus every record in discovery order (tasks, events, emails).
    pub fn into_parts(self) -> (Contact, Vec<ActivityRecord>) {
        (self.contact, self.batches.into_iter().flatten().collect())
    }
}

pub struct RecordFetcher<T> {
    transport: T,
}

impl<T: QueryTransport> RecordFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn fetch(&self, credential: &Credential, contact_id: &str) -> Result<FetchedActivity> {
        let id = soql::sanitize_contact_id(contact_id);
        if id.is_empty() {
            return Err(CrmError::Validation(
                "Contact ID must contain letters or digits".to_string(),
            ));
        }

        let contact = self.lookup_contact(credential, &id).await?;
        let email_query = contact.email.as_deref().map(soql::email_messages_to);

        let (tasks, events, emails) = tokio::join!(
            self.run_source(credential, SourceKind::Tasks, Some(soql::tasks_for(&id))),
            self.run_source(credential, SourceKind::Events, Some(soql::events_for(&id))),
            self.run_source(credential, SourceKind::EmailMessages, email_query),
        );

        let mut batches = Vec::with_capacity(SourceKind::ALL.len());
        let mut reports = Vec::with_capacity(SourceKind::ALL.len());
        for (report, records) in [tasks, events, emails] {
            reports.push(report);
            batches.push(records);
        }

        let fetched = FetchedActivity {
            contact,
            batches,
            reports,
        };
        if fetched.all_sources_skipped() {
            log::warn!("All activity sources failed for contact {id}; journey will be empty");
        }
        Ok(fetched)
    }

    async fn lookup_contact(&self, credential: &Credential, id: &str) -> Result<Contact> {
        let page = self
            .transport
            .query(credential, &soql::contact_lookup(id))
            .await
            .map_err(|err| CrmError::Query(err.to_string()))?;

        let Some(row) = page.records.into_iter().next() else {
            return Err(CrmError::NotFound("Contact not found".to_string()));
        };
        let row: ContactRow =
            serde_json::from_value(row).map_err(|err| CrmError::Query(err.to_string()))?;
        Ok(row.into())
    }

    async fn run_source(
        &self,
        credential: &Credential,
        source: SourceKind,
        soql: Option<String>,
    ) -> (SourceReport, Vec<ActivityRecord>) {
        let outcome = match soql {
            None => Err("contact has no email address".to_string()),
            Some(soql) => match self.transport.query(credential, &soql).await {
                Ok(page) => decode_records(source, page.records)
                    .map_err(|err| format!("unreadable rows: {err}")),
                Err(err) => Err(err.to_string()),
            },
        };

        match outcome {
            Ok(records) => {
                log::debug!("Source {source} returned {} records", records.len());
                let report = SourceReport {
                    source,
                    status: SourceStatus::Fetched(records.len()),
                };
                (report, records)
            }
            Err(reason) => {
                log::warn!("Query failed (continuing): source {source} skipped: {reason}");
                let report = SourceReport {
                    source,
                    status: SourceStatus::Skipped(reason),
                };
                (report, Vec::new())
            }
        }
    }
}
