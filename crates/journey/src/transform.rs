use journey_protocol::{
    EventCategory, EventMetadata, Journey, JourneyEvent, Position, Sentiment,
    EVENT_DURATION_SECONDS,
};

use crate::assembler::assemble;
use crate::record::{ActivityRecord, Contact};
use crate::timestamp::format_display_date;

pub const START_DESCRIPTION: &str = "The journey begins.";
pub const END_DESCRIPTION: &str = "The journey continues...";

/// x coordinate of the START event.
pub const INITIAL_OFFSET: i32 = -10;
/// Distance between consecutive events along x.
pub const POSITION_STEP: i32 = 4;
/// Characters of description/body appended after the subject.
pub const DESCRIPTION_BODY_LIMIT: usize = 50;

const DEFAULT_TYPE_LABEL: &str = "Email";
const DEFAULT_STATUS: &str = "Unknown";

/// Position of the event at `index` in the output sequence (START is 0).
pub fn position_for(index: usize) -> Position {
    let steps = i32::try_from(index).unwrap_or(i32::MAX);
    [
        INITIAL_OFFSET.saturating_add(steps.saturating_mul(POSITION_STEP)),
        0,
        0,
    ]
}

fn category_for_label(label: &str) -> EventCategory {
    match label {
        "Call" => EventCategory::PhoneCall,
        "Email" | "EmailMessage" => EventCategory::Email,
        "Meeting" => EventCategory::Meeting,
        _ => EventCategory::Support,
    }
}

pub fn category_for(record: &ActivityRecord) -> EventCategory {
    match record.type_label() {
        Some(label) => category_for_label(label),
        None if record.is_email_shaped() => EventCategory::Email,
        None => EventCategory::Support,
    }
}

pub fn sentiment_for(status: Option<&str>) -> Sentiment {
    match status {
        Some("Completed" | "Delivered") => Sentiment::Happy,
        Some("Closed" | "Sent") => Sentiment::Content,
        Some("In Progress") => Sentiment::Curious,
        Some("Deferred") => Sentiment::Concerned,
        _ => Sentiment::Neutral,
    }
}

/// `subject - <first 50 chars of body>`; falls back to `<type> activity`
/// when the record has no subject.
pub fn describe(record: &ActivityRecord) -> String {
    let mut description = match record.subject() {
        Some(subject) => subject.to_string(),
        None => format!(
            "{} activity",
            record.type_label().unwrap_or(DEFAULT_TYPE_LABEL)
        ),
    };
    if let Some(body) = record.body() {
        description.push_str(" - ");
        description.extend(body.chars().take(DESCRIPTION_BODY_LIMIT));
    }
    description
}

pub fn metadata_for(record: &ActivityRecord) -> EventMetadata {
    EventMetadata {
        kind: record
            .type_label()
            .unwrap_or(DEFAULT_TYPE_LABEL)
            .to_string(),
        status: record.status().unwrap_or(DEFAULT_STATUS).to_string(),
        date: format_display_date(record.timestamp().map(|ts| ts.raw())),
        call_type: record.call_type().map(str::to_string),
    }
}

fn activity_event(record: &ActivityRecord, index: usize) -> JourneyEvent {
    JourneyEvent {
        category: category_for(record),
        position: position_for(index),
        duration_seconds: Some(EVENT_DURATION_SECONDS),
        sentiment: Some(sentiment_for(record.status())),
        description: describe(record),
        metadata: Some(metadata_for(record)),
    }
}

/// Maps already-ordered records to events bracketed by START and END.
pub fn journey_events(records: &[ActivityRecord]) -> Vec<JourneyEvent> {
    let mut events = Vec::with_capacity(records.len() + 2);
    events.push(JourneyEvent::boundary(
        EventCategory::Start,
        position_for(0),
        START_DESCRIPTION,
    ));
    events.extend(
        records
            .iter()
            .enumerate()
            .map(|(i, record)| activity_event(record, i + 1)),
    );
    events.push(JourneyEvent::boundary(
        EventCategory::End,
        position_for(records.len() + 1),
        END_DESCRIPTION,
    ));
    log::debug!("Mapped {} records to {} events", records.len(), events.len());
    events
}

pub fn transform(records: &[ActivityRecord], contact: &Contact) -> Journey {
    assemble(contact, journey_events(records))
}
