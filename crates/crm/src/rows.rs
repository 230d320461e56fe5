//! Typed shapes of upstream query rows and their conversion into domain
//! records. All "which field means what" knowledge lives here.

use journey_core::{ActivityRecord, Contact, EmailMessageRecord, EventRecord, TaskRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::fetcher::SourceKind;

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ContactRow {
    id: String,
    name: Option<String>,
    email: Option<String>,
    account: Option<AccountRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AccountRef {
    name: Option<String>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        let display_name = present(row.name).unwrap_or_else(|| row.id.clone());
        Self {
            id: row.id,
            display_name,
            email: present(row.email),
            account_name: row.account.and_then(|account| present(account.name)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TaskRow {
    id: String,
    subject: Option<String>,
    activity_date: Option<String>,
    description: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
    status: Option<String>,
    call_type: Option<String>,
}

impl From<TaskRow> for ActivityRecord {
    fn from(row: TaskRow) -> Self {
        Self::Task(TaskRecord {
            id: row.id,
            subject: present(row.subject),
            description: present(row.description),
            kind: present(row.kind),
            status: present(row.status),
            call_type: present(row.call_type),
            activity_date: present(row.activity_date),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EventRow {
    id: String,
    subject: Option<String>,
    activity_date: Option<String>,
    description: Option<String>,
    #[serde(rename = "Type")]
    kind: Option<String>,
}

impl From<EventRow> for ActivityRecord {
    fn from(row: EventRow) -> Self {
        Self::Event(EventRecord {
            id: row.id,
            subject: present(row.subject),
            description: present(row.description),
            kind: present(row.kind),
            activity_date: present(row.activity_date),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EmailMessageRow {
    id: String,
    subject: Option<String>,
    message_date: Option<String>,
    text_body: Option<String>,
    status: Option<String>,
}

impl From<EmailMessageRow> for ActivityRecord {
    fn from(row: EmailMessageRow) -> Self {
        Self::EmailMessage(EmailMessageRecord {
            id: row.id,
            subject: present(row.subject),
            text_body: present(row.text_body),
            status: present(row.status),
            message_date: present(row.message_date),
        })
    }
}

fn decode<R>(rows: Vec<serde_json::Value>) -> Result<Vec<ActivityRecord>, serde_json::Error>
where
    R: DeserializeOwned + Into<ActivityRecord>,
{
    rows.into_iter()
        .map(|row| serde_json::from_value::<R>(row).map(Into::into))
        .collect()
}

pub(crate) fn decode_records(
    source: SourceKind,
    rows: Vec<serde_json::Value>,
) -> Result<Vec<ActivityRecord>, serde_json::Error> {
    match source {
        SourceKind::Tasks => decode::<TaskRow>(rows),
        SourceKind::Events => decode::<EventRow>(rows),
        SourceKind::EmailMessages => decode::<EmailMessageRow>(rows),
    }
}
