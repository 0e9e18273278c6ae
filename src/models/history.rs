//! Checkout history shown on the member's shelf

use serde::{Deserialize, Serialize};

use super::{hal, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "HistoryRecord")]
pub struct History {
    pub id: i64,
    pub user_email: Option<String>,
    pub checkout_date: Option<String>,
    pub returned_date: Option<String>,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRecord {
    id: Option<i64>,
    #[serde(rename = "_links")]
    links: Option<hal::Links>,
    user_email: Option<String>,
    checkout_date: Option<String>,
    returned_date: Option<String>,
    title: String,
    author: Option<String>,
    description: Option<String>,
    img: Option<String>,
}

impl TryFrom<HistoryRecord> for History {
    type Error = String;

    fn try_from(record: HistoryRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: hal::record_id(record.id, record.links.as_ref())?,
            user_email: record.user_email,
            checkout_date: record.checkout_date,
            returned_date: record.returned_date,
            title: record.title,
            author: record.author,
            description: record.description,
            img: record.img,
        })
    }
}

impl Resource for History {
    const COLLECTION: &'static str = "histories";

    fn id(&self) -> i64 {
        self.id
    }
}
