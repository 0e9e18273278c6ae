//! Questions sent by members to library staff

use serde::{Deserialize, Serialize};

use super::{hal, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "MessageRecord")]
pub struct Message {
    pub id: i64,
    pub user_email: Option<String>,
    pub title: String,
    pub question: String,
    pub admin_email: Option<String>,
    pub response: Option<String>,
    pub closed: bool,
}

/// Message as listed by the backend, identified through its self link
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageRecord {
    id: Option<i64>,
    #[serde(rename = "_links")]
    links: Option<hal::Links>,
    user_email: Option<String>,
    title: String,
    question: String,
    admin_email: Option<String>,
    response: Option<String>,
    #[serde(default)]
    closed: bool,
}

impl TryFrom<MessageRecord> for Message {
    type Error = String;

    fn try_from(record: MessageRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: hal::record_id(record.id, record.links.as_ref())?,
            user_email: record.user_email,
            title: record.title,
            question: record.question,
            admin_email: record.admin_email,
            response: record.response,
            closed: record.closed,
        })
    }
}

impl Message {
    /// A message is awaiting staff when it is open and has no response yet
    pub fn is_pending(&self) -> bool {
        !self.closed && self.response.as_deref().map_or(true, |r| r.trim().is_empty())
    }
}

impl Resource for Message {
    const COLLECTION: &'static str = "messages";

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(closed: bool, response: Option<&str>) -> Message {
        serde_json::from_value(serde_json::json!({
            "title": "Opening hours",
            "question": "When does the library open?",
            "response": response,
            "closed": closed,
            "_links": { "self": { "href": "http://localhost:8080/api/messages/12" } }
        }))
        .unwrap()
    }

    #[test]
    fn test_is_pending() {
        assert!(message(false, None).is_pending());
        assert!(message(false, Some("  ")).is_pending());
        assert!(!message(false, Some("Nine to five")).is_pending());
        assert!(!message(true, None).is_pending());
    }

    #[test]
    fn test_id_from_self_link() {
        let message = message(false, None);
        assert_eq!(message.id(), 12);
        assert_eq!(message.user_email, None);
    }
}
