//! Book (catalog) model

use serde::{Deserialize, Serialize};

use super::Resource;

/// Catalog entry as listed by `/api/books`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub copies: Option<i32>,
    pub copies_available: Option<i32>,
    pub category: Option<String>,
    /// Cover image, usually a data URL
    pub img: Option<String>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.copies_available.unwrap_or(0) > 0
    }
}

impl Resource for Book {
    const COLLECTION: &'static str = "books";

    fn id(&self) -> i64 {
        self.id
    }
}
