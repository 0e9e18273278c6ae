//! Pages of a server-paginated collection and the per-cycle fetch result

use crate::error::FetchError;

/// One page of a collection, in server order.
///
/// Only built through [`Page::new`], which enforces
/// `page_index < total_pages` (when `total_pages > 0`) and `page_size > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    page_index: u32,
    page_size: u32,
    total_pages: u32,
    total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(
        items: Vec<T>,
        page_index: u32,
        page_size: u32,
        total_pages: u32,
        total_elements: u64,
    ) -> Result<Self, FetchError> {
        if page_size == 0 {
            return Err(FetchError::malformed("page size must be positive"));
        }
        if total_pages == 0 {
            if !items.is_empty() {
                return Err(FetchError::malformed(format!(
                    "{} items returned for a collection with no pages",
                    items.len()
                )));
            }
            if page_index != 0 {
                return Err(FetchError::malformed(format!(
                    "page {} requested from a collection with no pages",
                    page_index
                )));
            }
        } else if page_index >= total_pages {
            return Err(FetchError::malformed(format!(
                "page index {} out of bounds for {} pages",
                page_index, total_pages
            )));
        }
        if items.len() > page_size as usize {
            return Err(FetchError::malformed(format!(
                "{} items exceed page size {}",
                items.len(),
                page_size
            )));
        }

        Ok(Self {
            items,
            page_index,
            page_size,
            total_pages,
            total_elements,
        })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Explicit empty state, distinct from loading or failure
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of the current request cycle.
///
/// Exactly one variant holds at a time; a new cycle replaces the whole value.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult<T> {
    Loading,
    Failed(FetchError),
    Loaded(Page<T>),
}

impl<T> FetchResult<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchResult::Loading)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    pub fn page(&self) -> Option<&Page<T>> {
        match self {
            FetchResult::Loaded(page) => Some(page),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchResult::Failed(error) => Some(error),
            _ => None,
        }
    }
}

impl<T> From<Result<Page<T>, FetchError>> for FetchResult<T> {
    fn from(result: Result<Page<T>, FetchError>) -> Self {
        match result {
            Ok(page) => FetchResult::Loaded(page),
            Err(error) => FetchResult::Failed(error),
        }
    }
}
