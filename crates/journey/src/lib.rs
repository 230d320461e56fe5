//! # Journey Core
//!
//! Turns a contact's CRM activity history into an ordered, positioned
//! sequence of visual events.
//!
//! ## Architecture
//!
//! ```text
//! Vec<ActivityRecord> per source (tasks, events, email messages)
//!     │
//!     ├──> merge (stable chronological sort, undated first)
//!     │
//!     ├──> journey_events
//!     │      ├─ START marker
//!     │      ├─ one event per record (category, sentiment, text, metadata)
//!     │      └─ END marker
//!     │
//!     └──> assemble (title + theme) ──> Journey
//! ```

mod assembler;
mod merge;
mod record;
mod timestamp;
mod transform;

pub use assembler::{assemble, journey_title};
pub use merge::{merge, sort_chronologically, sort_key};
pub use record::{
    ActivityRecord, Contact, EmailMessageRecord, EventRecord, RecordTimestamp, TaskRecord,
};
pub use timestamp::{format_display_date, parse_timestamp, sentinel};
pub use transform::{
    category_for, describe, journey_events, metadata_for, position_for, sentiment_for,
    transform, DESCRIPTION_BODY_LIMIT, END_DESCRIPTION, INITIAL_OFFSET, POSITION_STEP,
    START_DESCRIPTION,
};

pub use journey_protocol::{
    EventCategory, EventMetadata, Journey, JourneyEvent, Position, Sentiment, Theme,
};
