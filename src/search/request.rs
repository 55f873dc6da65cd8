//! Page requests and the tickets that identify their completions.
//!
//! Zellij web requests complete as a separate event carrying the context map
//! that was attached when the request was issued. A [`PageTicket`] is encoded
//! into that map so the completion can be matched back to the catalog state
//! that asked for it.

use std::collections::BTreeMap;

const CONTEXT_SOURCE: &str = "source";
const CONTEXT_SOURCE_VALUE: &str = "zbooks";
const CONTEXT_GENERATION: &str = "generation";
const CONTEXT_KIND: &str = "kind";
const CONTEXT_START_INDEX: &str = "start_index";

/// Whether a page replaces the list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// First page of a search, replaces the list on success.
    Initial,
    /// Subsequent page, appended on success.
    More,
}

impl PageKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::More => "more",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "initial" => Some(Self::Initial),
            "more" => Some(Self::More),
            _ => None,
        }
    }
}

/// Identity of one in-flight page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    /// Search generation the request belongs to.
    pub generation: u64,
    /// Replace or append.
    pub kind: PageKind,
    /// Offset the page was requested at.
    pub start_index: usize,
}

impl PageTicket {
    /// Encodes the ticket into a web request context map.
    ///
    /// # Examples
    ///
    /// ```
    /// use zbooks::search::{PageKind, PageTicket};
    ///
    /// let ticket = PageTicket { generation: 3, kind: PageKind::More, start_index: 40 };
    /// let context = ticket.to_context();
    /// assert_eq!(PageTicket::from_context(&context), Some(ticket));
    /// ```
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (CONTEXT_SOURCE.to_string(), CONTEXT_SOURCE_VALUE.to_string()),
            (CONTEXT_GENERATION.to_string(), self.generation.to_string()),
            (CONTEXT_KIND.to_string(), self.kind.as_str().to_string()),
            (CONTEXT_START_INDEX.to_string(), self.start_index.to_string()),
        ])
    }

    /// Decodes a ticket from a completion's context map.
    ///
    /// Returns `None` for contexts that were not produced by [`Self::to_context`].
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        if context.get(CONTEXT_SOURCE).map(String::as_str) != Some(CONTEXT_SOURCE_VALUE) {
            return None;
        }

        Some(Self {
            generation: context.get(CONTEXT_GENERATION)?.parse().ok()?,
            kind: PageKind::parse(context.get(CONTEXT_KIND)?)?,
            start_index: context.get(CONTEXT_START_INDEX)?.parse().ok()?,
        })
    }
}

/// A request for one page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: PageTicket,
    pub query: String,
    pub max_results: usize,
    pub start_index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_context_is_rejected() {
        let mut context = BTreeMap::new();
        context.insert("generation".to_string(), "1".to_string());
        context.insert("kind".to_string(), "initial".to_string());
        context.insert("start_index".to_string(), "0".to_string());
        assert_eq!(PageTicket::from_context(&context), None);
    }

    #[test]
    fn malformed_fields_are_rejected() {
        let ticket = PageTicket {
            generation: 1,
            kind: PageKind::Initial,
            start_index: 0,
        };
        let mut context = ticket.to_context();
        context.insert("kind".to_string(), "sideways".to_string());
        assert_eq!(PageTicket::from_context(&context), None);
    }
}
