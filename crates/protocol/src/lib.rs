use anyhow::Result;
use serde::{Deserialize, Serialize};

mod envelope;

pub use envelope::{AuthResponse, JourneyRequest, JourneyResponse};

/// Seconds a non-boundary event stays on stage in the client.
pub const EVENT_DURATION_SECONDS: f64 = 2.5;

/// Spatial coordinate of an event. Only the first axis varies.
pub type Position = [i32; 3];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    #[serde(rename = "start")]
    Start,
    PhoneCall,
    Email,
    Meeting,
    Support,
    #[serde(rename = "end")]
    End,
}

impl EventCategory {
    pub const fn is_boundary(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Happy,
    Content,
    Curious,
    Neutral,
    Concerned,
}

/// Display labels rendered next to an event.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct EventMetadata {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(
        rename = "Call Type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub call_type: Option<String>,
}

impl EventMetadata {
    /// Label/value pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = vec![
            ("Type", self.kind.as_str()),
            ("Status", self.status.as_str()),
            ("Date", self.date.as_str()),
        ];
        if let Some(call_type) = &self.call_type {
            entries.push(("Call Type", call_type.as_str()));
        }
        entries
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JourneyEvent {
    #[serde(rename = "type")]
    pub category: EventCategory,
    pub position: Position,
    #[serde(
        rename = "eventDuration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    pub description: String,
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EventMetadata>,
}

impl JourneyEvent {
    /// A START/END marker: no duration, sentiment or metadata.
    pub fn boundary(category: EventCategory, position: Position, description: &str) -> Self {
        Self {
            category,
            position,
            duration_seconds: None,
            sentiment: None,
            description: description.to_string(),
            metadata: None,
        }
    }
}

/// Scene colors used by the visualization client.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub ground_color: String,
    pub grid_color: String,
    pub sky_top_color: String,
    pub sky_bottom_color: String,
    pub purchase_coin_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            ground_color: "#f5f5f7".to_string(),
            grid_color: "#cccccc".to_string(),
            sky_top_color: "#a0c3ff".to_string(),
            sky_bottom_color: "#f0f8ff".to_string(),
            purchase_coin_color: "#ffd700".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Journey {
    #[serde(rename = "journeyTitle")]
    pub title: String,
    pub theme: Theme,
    pub events: Vec<JourneyEvent>,
}

pub fn serialize_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(Into::into)
}
