//! Storage record models and favorite key strategy.

use crate::domain::Book;
use serde::{Deserialize, Serialize};

/// A persisted favorite flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Whether the book is a favorite.
    pub value: bool,

    /// Unix timestamp of the last write.
    pub updated_at: i64,
}

impl FavoriteRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn now(value: bool) -> Self {
        Self {
            value,
            updated_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Which book field names a favorite in the settings store.
///
/// `Title` matches how favorites have always been stored, but two different
/// books sharing a title share one flag. `Id` keys by the service identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FavoriteKey {
    #[default]
    Title,
    Id,
}

impl FavoriteKey {
    /// Parses a configuration value (`"title"` or `"id"`, case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    /// Returns the store key for `book`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zbooks::Book;
    /// use zbooks::storage::FavoriteKey;
    ///
    /// let book = Book::new("vol-42", "Dune", vec![]);
    /// assert_eq!(FavoriteKey::Title.key_for(&book), "Dune");
    /// assert_eq!(FavoriteKey::Id.key_for(&book), "vol-42");
    /// ```
    #[must_use]
    pub fn key_for(self, book: &Book) -> &str {
        match self {
            Self::Title => &book.title,
            Self::Id => &book.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_strategy() {
        assert_eq!(FavoriteKey::parse("Title"), Some(FavoriteKey::Title));
        assert_eq!(FavoriteKey::parse(" id "), Some(FavoriteKey::Id));
        assert_eq!(FavoriteKey::parse("isbn"), None);
    }
}
