//! Book search service seam.
//!
//! The search service is asynchronous with a single completion: the catalog
//! hands out a [`PageRequest`], the plugin shim performs it as a Zellij web
//! request, and the completion comes back as an event carrying the status,
//! body and the request's [`PageTicket`].
//!
//! # Modules
//!
//! - `request`: page requests and completion tickets
//! - `source`: [`BookSource`] trait and endpoint implementations
//! - `google`: Google Books volumes decoding

pub mod google;
pub mod request;
pub mod source;

pub use request::{PageKind, PageRequest, PageTicket};
pub use source::{build_source, BookSource, GoogleBooksSource, PlainJsonSource, SourceKind};

use crate::domain::error::{BookshelfError, Result};
use crate::domain::Book;

/// Maximum number of body characters kept in a fetch error message.
const ERROR_EXCERPT_CHARS: usize = 120;

/// Turns a web request completion into a page of books.
///
/// Any status outside `200..300` is a fetch failure; a success body that does
/// not decode is a decode failure for the whole page.
///
/// # Errors
///
/// Returns [`BookshelfError::Fetch`] or [`BookshelfError::Decode`].
///
/// # Examples
///
/// ```
/// use zbooks::search::{interpret_response, PlainJsonSource};
///
/// let source = PlainJsonSource::new("http://localhost/books");
/// assert!(interpret_response(&source, 500, b"boom").is_err());
/// assert_eq!(interpret_response(&source, 200, b"[]")?.len(), 0);
/// # Ok::<(), zbooks::BookshelfError>(())
/// ```
pub fn interpret_response(source: &dyn BookSource, status: u16, body: &[u8]) -> Result<Vec<Book>> {
    if !(200..300).contains(&status) {
        let message: String = String::from_utf8_lossy(body)
            .trim()
            .chars()
            .take(ERROR_EXCERPT_CHARS)
            .collect();
        return Err(BookshelfError::Fetch { status, message });
    }

    source.decode_page(body)
}
