//! SOQL text for the contact lookup and the three activity sources.

/// Most email messages pulled per journey.
pub const EMAIL_MESSAGE_LIMIT: usize = 20;

/// Keeps ASCII letters and digits only; record ids never contain anything else.
pub fn sanitize_contact_id(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Escapes a value for use inside a quoted `LIKE` pattern.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '\'' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// `id` must already be sanitized.
pub fn contact_lookup(id: &str) -> String {
    format!("SELECT Id, Name, Email, Account.Name FROM Contact WHERE Id = '{id}'")
}

pub fn tasks_for(id: &str) -> String {
    format!(
        "SELECT Id, Subject, ActivityDate, Description, Type, Status, CallType FROM Task \
         WHERE WhoId = '{id}' ORDER BY ActivityDate ASC NULLS LAST"
    )
}

pub fn events_for(id: &str) -> String {
    format!(
        "SELECT Id, Subject, ActivityDate, Description, Type FROM Event \
         WHERE WhoId = '{id}' ORDER BY ActivityDate ASC NULLS LAST"
    )
}

pub fn email_messages_to(email: &str) -> String {
    format!(
        "SELECT Id, Subject, MessageDate, TextBody, Status FROM EmailMessage \
         WHERE ToAddress LIKE '%{}%' ORDER BY MessageDate ASC NULLS LAST LIMIT {EMAIL_MESSAGE_LIMIT}",
        escape_like(email)
    )
}
