/// The person whose journey is being rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contact {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub account_name: Option<String>,
}

/// Row from the `Task` source (calls, to-dos, logged emails).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskRecord {
    pub id: String,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub call_type: Option<String>,
    pub activity_date: Option<String>,
}

/// Row from the `Event` source (calendar entries).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventRecord {
    pub id: String,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub activity_date: Option<String>,
}

/// Row from the `EmailMessage` source. Carries no type label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmailMessageRecord {
    pub id: String,
    pub subject: Option<String>,
    pub text_body: Option<String>,
    pub status: Option<String>,
    pub message_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityRecord {
    Task(TaskRecord),
    Event(EventRecord),
    EmailMessage(EmailMessageRecord),
}

/// The single date field a record carries, still in upstream text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordTimestamp<'a> {
    Activity(&'a str),
    Message(&'a str),
}

impl<'a> RecordTimestamp<'a> {
    pub fn raw(self) -> &'a str {
        match self {
            Self::Activity(raw) | Self::Message(raw) => raw,
        }
    }
}

impl ActivityRecord {
    pub fn id(&self) -> &str {
        match self {
            Self::Task(task) => &task.id,
            Self::Event(event) => &event.id,
            Self::EmailMessage(email) => &email.id,
        }
    }

    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::Task(task) => task.subject.as_deref(),
            Self::Event(event) => event.subject.as_deref(),
            Self::EmailMessage(email) => email.subject.as_deref(),
        }
    }

    /// Free text shown after the subject: description for activities,
    /// text body for email messages.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Task(task) => task.description.as_deref(),
            Self::Event(event) => event.description.as_deref(),
            Self::EmailMessage(email) => email.text_body.as_deref(),
        }
    }

    pub fn status(&self) -> Option<&str> {
        match self {
            Self::Task(task) => task.status.as_deref(),
            Self::Event(_) => None,
            Self::EmailMessage(email) => email.status.as_deref(),
        }
    }

    pub fn type_label(&self) -> Option<&str> {
        match self {
            Self::Task(task) => task.kind.as_deref(),
            Self::Event(event) => event.kind.as_deref(),
            Self::EmailMessage(_) => None,
        }
    }

    pub fn call_type(&self) -> Option<&str> {
        match self {
            Self::Task(task) => task.call_type.as_deref(),
            Self::Event(_) | Self::EmailMessage(_) => None,
        }
    }

    pub fn timestamp(&self) -> Option<RecordTimestamp<'_>> {
        match self {
            Self::Task(task) => task.activity_date.as_deref().map(RecordTimestamp::Activity),
            Self::Event(event) => event.activity_date.as_deref().map(RecordTimestamp::Activity),
            Self::EmailMessage(email) => {
                email.message_date.as_deref().map(RecordTimestamp::Message)
            }
        }
    }

    /// True when the record is identified as an email only by its message date.
    pub fn is_email_shaped(&self) -> bool {
        matches!(self.timestamp(), Some(RecordTimestamp::Message(_)))
    }
}
