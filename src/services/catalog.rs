//! Paginated endpoints of the library backend

use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::models::{Book, History, Message, Resource, Review};

/// Filter parameters sent with a list request, in insertion order
pub type Filters = IndexMap<String, String>;

/// Query keys owned by pagination; filters cannot override them.
const RESERVED_KEYS: [&str; 2] = ["page", "size"];

/// A paginated collection endpoint listing `T`.
pub struct Endpoint<T> {
    path: &'static str,
    requires_auth: bool,
    defaults: Filters,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> Endpoint<T> {
    pub fn new(path: &'static str, requires_auth: bool) -> Self {
        Self {
            path,
            requires_auth,
            defaults: Filters::new(),
            _resource: PhantomData,
        }
    }

    /// Filter always sent unless the caller supplies the same key
    pub fn with_default(mut self, key: &str, value: &str) -> Self {
        self.defaults.insert(key.to_string(), value.to_string());
        self
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    pub fn collection(&self) -> &'static str {
        T::COLLECTION
    }

    /// Query pairs for one page: defaults, then caller filters, then `page` and `size`.
    pub fn query(&self, page_index: u32, page_size: u32, filters: &Filters) -> Vec<(String, String)> {
        let mut merged = self.defaults.clone();
        merged.extend(filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        for key in RESERVED_KEYS {
            merged.shift_remove(key);
        }

        let mut query: Vec<(String, String)> = merged.into_iter().collect();
        query.push(("page".to_string(), page_index.to_string()));
        query.push(("size".to_string(), page_size.to_string()));
        query
    }
}

impl<T> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path,
            requires_auth: self.requires_auth,
            defaults: self.defaults.clone(),
            _resource: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("path", &self.path)
            .field("requires_auth", &self.requires_auth)
            .field("defaults", &self.defaults)
            .finish()
    }
}

/// Whole catalog
pub fn books() -> Endpoint<Book> {
    Endpoint::new("/api/books", false)
}

/// Catalog search; filter `title`
pub fn books_by_title() -> Endpoint<Book> {
    Endpoint::new("/api/books/search/findByTitleContaining", false)
}

/// Catalog by category; filter `category`
pub fn books_by_category() -> Endpoint<Book> {
    Endpoint::new("/api/books/search/findByCategory", false)
}

/// Reviews of one book; filter `bookId`
pub fn reviews_by_book() -> Endpoint<Review> {
    Endpoint::new("/api/reviews/search/findByBookId", false)
}

/// Unanswered member questions, for the admin messages view
pub fn open_messages() -> Endpoint<Message> {
    Endpoint::new("/api/messages/search/findByClosed", true).with_default("closed", "false")
}

/// One member's questions; filter `userEmail`
pub fn messages_by_user() -> Endpoint<Message> {
    Endpoint::new("/api/messages/search/findByUserEmail", true)
}

/// Shelf history; filter `userEmail`
pub fn shelf_history() -> Endpoint<History> {
    Endpoint::new("/api/histories/search/findBooksByUserEmail", true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_order_and_defaults() {
        let query = open_messages().query(2, 5, &Filters::new());
        assert_eq!(
            query,
            vec![
                ("closed".to_string(), "false".to_string()),
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_filters_override_defaults_but_not_paging() {
        let mut filters = Filters::new();
        filters.insert("closed".to_string(), "true".to_string());
        filters.insert("page".to_string(), "99".to_string());
        filters.insert("userEmail".to_string(), "reader@example.com".to_string());

        let query = open_messages().query(0, 5, &filters);
        assert_eq!(query[0], ("closed".to_string(), "true".to_string()));
        assert_eq!(query[1], ("userEmail".to_string(), "reader@example.com".to_string()));
        assert_eq!(query[2], ("page".to_string(), "0".to_string()));
        assert_eq!(query.len(), 4);
    }

    #[test]
    fn test_endpoint_metadata() {
        assert!(open_messages().requires_auth());
        assert!(shelf_history().requires_auth());
        assert!(!books_by_title().requires_auth());
        assert_eq!(books().collection(), "books");
        assert_eq!(reviews_by_book().collection(), "reviews");
        assert_eq!(shelf_history().collection(), "histories");
    }
}
