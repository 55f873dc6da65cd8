//! Book search sources.
//!
//! A [`BookSource`] knows how to address one search endpoint and how to read
//! its responses. The plugin shim performs the actual HTTP request; sources
//! stay pure so they can be tested without a network.

use crate::domain::error::Result;
use crate::domain::{decode_books, Book};
use crate::search::google::decode_volumes;
use crate::search::request::PageRequest;
use url::Url;

/// Default Google Books volumes endpoint.
pub const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Addressing and decoding for one search endpoint.
pub trait BookSource: std::fmt::Debug {
    /// Builds the GET URL for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL cannot be parsed.
    fn request_url(&self, request: &PageRequest) -> Result<String>;

    /// Decodes a successful response body into one page of books.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the body does not match the endpoint's format.
    fn decode_page(&self, body: &[u8]) -> Result<Vec<Book>>;
}

/// Which response format the configured endpoint speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// Google Books `volumes` API.
    #[default]
    Google,
    /// A JSON array of book records in the plain wire format.
    Json,
}

impl SourceKind {
    /// Parses a configuration value (`"google"` or `"json"`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "google" => Some(Self::Google),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Google Books `volumes` endpoint.
#[derive(Debug, Clone)]
pub struct GoogleBooksSource {
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
        }
    }
}

impl Default for GoogleBooksSource {
    fn default() -> Self {
        Self::new(GOOGLE_BOOKS_URL, None)
    }
}

impl BookSource for GoogleBooksSource {
    fn request_url(&self, request: &PageRequest) -> Result<String> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", &request.query)
                .append_pair("maxResults", &request.max_results.to_string())
                .append_pair("startIndex", &request.start_index.to_string());
            if let Some(key) = &self.api_key {
                pairs.append_pair("key", key);
            }
        }
        Ok(url.into())
    }

    fn decode_page(&self, body: &[u8]) -> Result<Vec<Book>> {
        decode_volumes(body)
    }
}

/// Endpoint returning book records in the plain wire format.
///
/// Receives the same `query`, `maxResults` and `startIndex` parameters.
#[derive(Debug, Clone)]
pub struct PlainJsonSource {
    base_url: String,
}

impl PlainJsonSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl BookSource for PlainJsonSource {
    fn request_url(&self, request: &PageRequest) -> Result<String> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("query", &request.query)
            .append_pair("maxResults", &request.max_results.to_string())
            .append_pair("startIndex", &request.start_index.to_string());
        Ok(url.into())
    }

    fn decode_page(&self, body: &[u8]) -> Result<Vec<Book>> {
        decode_books(body)
    }
}

/// Builds the source selected by configuration.
///
/// `api_url` overrides the endpoint; Google falls back to [`GOOGLE_BOOKS_URL`].
/// A plain JSON source without `api_url` has nothing to talk to, so it also
/// falls back to Google.
#[must_use]
pub fn build_source(
    kind: SourceKind,
    api_url: Option<&str>,
    api_key: Option<&str>,
) -> Box<dyn BookSource> {
    match (kind, api_url) {
        (SourceKind::Json, Some(url)) => Box::new(PlainJsonSource::new(url)),
        (SourceKind::Json, None) => {
            tracing::warn!("json source configured without api_url, using Google Books");
            Box::new(GoogleBooksSource::new(GOOGLE_BOOKS_URL, api_key.map(String::from)))
        }
        (SourceKind::Google, url) => Box::new(GoogleBooksSource::new(
            url.unwrap_or(GOOGLE_BOOKS_URL),
            api_key.map(String::from),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::request::{PageKind, PageTicket};

    fn request(query: &str, start_index: usize) -> PageRequest {
        PageRequest {
            ticket: PageTicket {
                generation: 1,
                kind: PageKind::Initial,
                start_index,
            },
            query: query.to_string(),
            max_results: 20,
            start_index,
        }
    }

    #[test]
    fn google_url_encodes_query_and_paging() {
        let source = GoogleBooksSource::default();
        let url = source.request_url(&request("rust & wasm", 40)).unwrap();
        assert_eq!(
            url,
            "https://www.googleapis.com/books/v1/volumes?q=rust+%26+wasm&maxResults=20&startIndex=40"
        );
    }

    #[test]
    fn google_url_appends_api_key() {
        let source = GoogleBooksSource::new(GOOGLE_BOOKS_URL, Some("k3y".to_string()));
        let url = source.request_url(&request("iOS", 0)).unwrap();
        assert!(url.ends_with("&key=k3y"));
    }

    #[test]
    fn plain_source_uses_its_own_parameters() {
        let source = PlainJsonSource::new("http://localhost:8080/books");
        let url = source.request_url(&request("iOS", 0)).unwrap();
        assert_eq!(
            url,
            "http://localhost:8080/books?query=iOS&maxResults=20&startIndex=0"
        );
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        let source = PlainJsonSource::new("not a url");
        assert!(source.request_url(&request("iOS", 0)).is_err());
    }

    #[test]
    fn parses_source_kind() {
        assert_eq!(SourceKind::parse("Google"), Some(SourceKind::Google));
        assert_eq!(SourceKind::parse("json"), Some(SourceKind::Json));
        assert_eq!(SourceKind::parse("xml"), None);
    }
}
