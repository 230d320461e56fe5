use journey_protocol::{Journey, JourneyEvent, Theme};

use crate::record::Contact;

pub fn journey_title(contact: &Contact) -> String {
    format!("{}'s Journey", contact.display_name)
}

/// Wraps transformer output into the payload; events pass through untouched.
pub fn assemble(contact: &Contact, events: Vec<JourneyEvent>) -> Journey {
    Journey {
        title: journey_title(contact),
        theme: Theme::default(),
        events,
    }
}
