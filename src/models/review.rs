//! Book reviews

use serde::{Deserialize, Serialize};

use super::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub user_email: Option<String>,
    pub date: Option<String>,
    pub rating: f64,
    pub book_id: i64,
    pub review_description: Option<String>,
}

impl Resource for Review {
    const COLLECTION: &'static str = "reviews";

    fn id(&self) -> i64 {
        self.id
    }
}
