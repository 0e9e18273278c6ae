//! Decoding of the backend's pagination envelope
//!
//! The backend lists collections as
//! `{ "_embedded": { "<collection>": [...] }, "page": { "size", "totalElements", "totalPages", "number" } }`.
//! That shape is an external contract; this module only reads it.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Page, Resource};
use crate::error::FetchError;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "_embedded", default)]
    embedded: Option<Map<String, Value>>,
    page: PageMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageMetadata {
    size: Option<u32>,
    total_elements: Option<u64>,
    total_pages: u32,
    number: Option<u32>,
}

/// Decode a response body into the page that was requested.
///
/// Fails with [`FetchError::Malformed`] when the body is not an envelope,
/// the collection is missing or undecodable, the server answered for a
/// different page, or the page bounds are invalid.
pub fn parse_page<T: Resource>(
    body: &[u8],
    requested_index: u32,
    requested_size: u32,
) -> Result<Page<T>, FetchError> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| FetchError::malformed(format!("invalid envelope: {}", e)))?;

    let items = match envelope.embedded {
        Some(mut embedded) => match embedded.remove(T::COLLECTION) {
            Some(records) => serde_json::from_value::<Vec<T>>(records).map_err(|e| {
                FetchError::malformed(format!("invalid {} record: {}", T::COLLECTION, e))
            })?,
            None if embedded.is_empty() => Vec::new(),
            None => {
                return Err(FetchError::malformed(format!(
                    "collection '{}' missing from _embedded",
                    T::COLLECTION
                )))
            }
        },
        None => Vec::new(),
    };

    let page_index = envelope.page.number.unwrap_or(requested_index);
    if page_index != requested_index {
        return Err(FetchError::malformed(format!(
            "response is for page {}, requested page {}",
            page_index, requested_index
        )));
    }

    let total_elements = envelope
        .page
        .total_elements
        .unwrap_or(items.len() as u64);

    Page::new(
        items,
        page_index,
        envelope.page.size.unwrap_or(requested_size),
        envelope.page.total_pages,
        total_elements,
    )
}
