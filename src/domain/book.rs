//! Book domain model and wire-format decoding.
//!
//! A [`Book`] is an immutable record fetched from the search service. The wire
//! format uses the service's camelCase field names; every field except the two
//! URLs is required, and one bad record rejects the whole page.

use crate::domain::error::Result;
use serde::{Deserialize, Serialize};
use url::Url;

/// A book returned by the search service.
///
/// `is_favorite` is whatever the data source reported at decode time. The
/// locally persisted flag is resolved separately, see
/// [`crate::storage::FavoriteKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub description: String,
    #[serde(rename = "thumbnailURL")]
    pub thumbnail_url: Option<Url>,
    #[serde(rename = "buyLinkURL")]
    pub buy_link_url: Option<Url>,
    pub is_favorite: bool,
}

impl Book {
    /// Creates a book with no links that is not a favorite.
    ///
    /// # Examples
    ///
    /// ```
    /// use zbooks::Book;
    ///
    /// let book = Book::new("b1", "Rust in Action", vec!["Tim McNamara".into()]);
    /// assert!(!book.is_favorite);
    /// assert!(book.buy_link_url.is_none());
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, authors: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors,
            description: String::new(),
            thumbnail_url: None,
            buy_link_url: None,
            is_favorite: false,
        }
    }

    /// Authors joined for display, e.g. `"Ada Lovelace, Charles Babbage"`.
    #[must_use]
    pub fn authors_line(&self) -> String {
        self.authors.join(", ")
    }

    /// Returns a copy of this book with the favorite flag replaced.
    #[must_use]
    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }
}

/// Decodes a page of books in the plain wire format (a JSON array of records).
///
/// Record order is preserved. A missing required field or malformed URL in any
/// record fails the whole page.
///
/// # Errors
///
/// Returns [`crate::BookshelfError::Decode`] if the body is not a valid page.
///
/// # Examples
///
/// ```
/// let body = br#"[{"id":"1","title":"Dune","authors":["Frank Herbert"],
///                 "description":"Spice.","isFavorite":false}]"#;
/// let books = zbooks::domain::decode_books(body)?;
/// assert_eq!(books[0].title, "Dune");
/// # Ok::<(), zbooks::BookshelfError>(())
/// ```
pub fn decode_books(body: &[u8]) -> Result<Vec<Book>> {
    let books: Vec<Book> = serde_json::from_slice(body)?;
    tracing::debug!(count = books.len(), "decoded book page");
    Ok(books)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"[
        {
            "id": "1234",
            "title": "Book 1",
            "authors": ["Author 1"],
            "description": "Description 1",
            "thumbnailURL": "https://example.com/image1.jpg",
            "buyLinkURL": "https://example.com/buy1",
            "isFavorite": true
        },
        {
            "id": "1234",
            "title": "Book 2",
            "authors": ["Author 2"],
            "description": "Description 2",
            "thumbnailURL": "https://example.com/image2.jpg",
            "buyLinkURL": "https://example.com/buy2",
            "isFavorite": false
        }
    ]"#;

    #[test]
    fn decodes_page_in_order() {
        let books = decode_books(SAMPLE_PAGE.as_bytes()).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Book 1");
        assert_eq!(books[1].title, "Book 2");
        assert!(books[0].is_favorite);
        assert_eq!(
            books[0].buy_link_url.as_ref().map(Url::as_str),
            Some("https://example.com/buy1")
        );
    }

    #[test]
    fn optional_urls_may_be_absent_or_null() {
        let body = r#"[
            {"id":"a","title":"A","authors":[],"description":"","isFavorite":false},
            {"id":"b","title":"B","authors":[],"description":"","isFavorite":false,
             "thumbnailURL":null,"buyLinkURL":null}
        ]"#;
        let books = decode_books(body.as_bytes()).unwrap();
        assert!(books.iter().all(|b| b.thumbnail_url.is_none() && b.buy_link_url.is_none()));
    }

    #[test]
    fn missing_required_field_fails_whole_page() {
        let body = r#"[
            {"id":"a","title":"A","authors":[],"description":"","isFavorite":false},
            {"id":"b","title":"B","authors":[],"isFavorite":false}
        ]"#;
        assert!(decode_books(body.as_bytes()).is_err());
    }

    #[test]
    fn malformed_url_fails_page() {
        let body = r#"[{"id":"a","title":"A","authors":[],"description":"",
                        "thumbnailURL":"not a url","isFavorite":false}]"#;
        assert!(decode_books(body.as_bytes()).is_err());
    }

    #[test]
    fn authors_line_joins_with_commas() {
        let book = Book::new("x", "X", vec!["Ann".into(), "Bo".into()]);
        assert_eq!(book.authors_line(), "Ann, Bo");
    }
}
