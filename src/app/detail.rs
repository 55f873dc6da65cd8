//! Single-book detail state.
//!
//! Mirrors one book's favorite flag to the settings store: read on entry,
//! written on every toggle and once more on exit.

use crate::domain::error::Result;
use crate::domain::Book;
use crate::storage::{FavoriteKey, SettingsStore};
use url::Url;

/// Resolves a book's favorite flag against the settings store.
///
/// A stored value wins. Without one, the flag the data source reported is
/// kept. Store read failures are logged and fall back the same way.
///
/// # Examples
///
/// ```
/// use zbooks::app::detail::resolve_favorite;
/// use zbooks::storage::{FavoriteKey, MemorySettingsStore, SettingsStore};
/// use zbooks::Book;
///
/// let mut store = MemorySettingsStore::default();
/// let book = Book::new("1", "Dune", vec![]).with_favorite(true);
/// assert!(resolve_favorite(&store, FavoriteKey::Title, &book));
///
/// store.set("Dune", false)?;
/// assert!(!resolve_favorite(&store, FavoriteKey::Title, &book));
/// # Ok::<(), zbooks::BookshelfError>(())
/// ```
#[must_use]
pub fn resolve_favorite(store: &dyn SettingsStore, strategy: FavoriteKey, book: &Book) -> bool {
    let key = strategy.key_for(book);
    match store.lookup(key) {
        Ok(stored) => stored.unwrap_or(book.is_favorite),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "favorite lookup failed, using source flag");
            book.is_favorite
        }
    }
}

/// State of the detail screen for one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    book: Book,
    key: String,
    is_favorite: bool,
}

impl DetailState {
    /// Opens `book`, reading its favorite flag from `store`.
    #[must_use]
    pub fn enter(book: Book, store: &dyn SettingsStore, strategy: FavoriteKey) -> Self {
        let is_favorite = resolve_favorite(store, strategy, &book);
        let key = strategy.key_for(&book).to_string();
        tracing::debug!(key = %key, is_favorite, "detail entered");
        Self { book, key, is_favorite }
    }

    #[must_use]
    pub const fn book(&self) -> &Book {
        &self.book
    }

    /// Settings store key this detail reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    #[must_use]
    pub fn buy_link(&self) -> Option<&Url> {
        self.book.buy_link_url.as_ref()
    }

    /// Flips the flag and writes it to `store` before returning.
    ///
    /// The in-memory flag is flipped even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the write fails.
    pub fn toggle_favorite(&mut self, store: &mut dyn SettingsStore) -> Result<bool> {
        self.is_favorite = !self.is_favorite;
        tracing::debug!(key = %self.key, is_favorite = self.is_favorite, "favorite toggled");
        store.set(&self.key, self.is_favorite)?;
        Ok(self.is_favorite)
    }

    /// Leaves the detail screen, writing the flag once more.
    ///
    /// Returns the book carrying the resolved flag so the list can mirror it.
    /// A failed write is logged.
    #[must_use]
    pub fn exit(self, store: &mut dyn SettingsStore) -> Book {
        if let Err(e) = store.set(&self.key, self.is_favorite) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist favorite on exit");
        }
        tracing::debug!(key = %self.key, is_favorite = self.is_favorite, "detail exited");
        self.book.with_favorite(self.is_favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookshelfError;
    use crate::storage::MemorySettingsStore;

    #[derive(Debug, Default)]
    struct BrokenStore;

    impl SettingsStore for BrokenStore {
        fn lookup(&self, _key: &str) -> Result<Option<bool>> {
            Err(BookshelfError::Storage("unreadable".to_string()))
        }

        fn set(&mut self, _key: &str, _value: bool) -> Result<()> {
            Err(BookshelfError::Storage("read-only".to_string()))
        }
    }

    fn book() -> Book {
        Book::new("1234", "Book 1", vec!["Author 1".to_string()])
    }

    #[test]
    fn entry_reads_store() {
        let mut store = MemorySettingsStore::default();
        store.set("Book 1", true).unwrap();

        let detail = DetailState::enter(book(), &store, FavoriteKey::Title);
        assert!(detail.is_favorite());
        assert_eq!(detail.key(), "Book 1");
    }

    #[test]
    fn entry_without_stored_value_keeps_source_flag() {
        let store = MemorySettingsStore::default();
        let detail = DetailState::enter(book().with_favorite(true), &store, FavoriteKey::Title);
        assert!(detail.is_favorite());
    }

    #[test]
    fn toggle_persists_immediately() {
        let mut store = MemorySettingsStore::default();
        let mut detail = DetailState::enter(book(), &store, FavoriteKey::Title);

        assert!(detail.toggle_favorite(&mut store).unwrap());
        assert!(store.get("Book 1"));

        assert!(!detail.toggle_favorite(&mut store).unwrap());
        assert!(!store.get("Book 1"));
    }

    #[test]
    fn exit_returns_book_with_flag_and_persists() {
        let mut store = MemorySettingsStore::default();
        let mut detail = DetailState::enter(book(), &store, FavoriteKey::Id);
        detail.toggle_favorite(&mut store).unwrap();

        let returned = detail.exit(&mut store);
        assert!(returned.is_favorite);
        assert!(store.get("1234"));
        assert!(!store.get("Book 1"));
    }

    #[test]
    fn failed_write_still_toggles_in_memory() {
        let mut store = BrokenStore;
        let mut detail = DetailState::enter(book(), &store, FavoriteKey::Title);
        assert!(!detail.is_favorite());

        assert!(detail.toggle_favorite(&mut store).is_err());
        assert!(detail.is_favorite());
        assert!(detail.exit(&mut store).is_favorite);
    }
}
