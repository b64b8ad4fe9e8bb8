//! Favorites store.
//!
//! # Responsibility
//! - Track which quotes the user marked as favorite, with full payloads.
//! - Mirror every change to an optional repository.
//!
//! # Invariants
//! - A quote id appears at most once.
//! - `list()` returns favorites in the order they were added.
//! - Queries reflect a mutation as soon as the mutating call returns;
//!   persistence failures are logged and never roll back memory state.

use crate::model::quote::Quote;
use crate::repo::favorite_repo::FavoriteRepository;
use log::{error, info, warn};

/// In-memory favorites list with optional write-through persistence.
pub struct FavoritesStore {
    entries: Vec<Quote>,
    repo: Option<Box<dyn FavoriteRepository>>,
}

impl FavoritesStore {
    /// Creates an empty store that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            entries: Vec::new(),
            repo: None,
        }
    }

    /// Creates a store hydrated from `repo`.
    ///
    /// A failed read starts the store empty but keeps the repository attached,
    /// so later mutations are still persisted.
    pub fn load(repo: Box<dyn FavoriteRepository>) -> Self {
        let entries = match repo.load_favorites() {
            Ok(quotes) => {
                info!(
                    "event=favorites_load module=favorites status=ok count={}",
                    quotes.len()
                );
                dedupe_by_id(quotes)
            }
            Err(err) => {
                error!("event=favorites_load module=favorites status=error error={err}");
                Vec::new()
            }
        };

        Self {
            entries,
            repo: Some(repo),
        }
    }

    /// Adds `quote` unless a favorite with the same id exists.
    ///
    /// Returns `true` when the quote was inserted.
    pub fn add(&mut self, quote: Quote) -> bool {
        if self.is_favorite(&quote.id) {
            return false;
        }

        if let Some(repo) = &self.repo {
            if let Err(err) = repo.insert_favorite(&quote) {
                warn!(
                    "event=favorite_persist module=favorites status=error op=insert quote_id={} error={err}",
                    quote.id
                );
            }
        }
        self.entries.push(quote);
        true
    }

    /// Removes the favorite with `id`; absent ids are a no-op.
    ///
    /// Returns `true` when an entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.entries.iter().position(|quote| quote.id == id) else {
            return false;
        };
        self.entries.remove(index);

        if let Some(repo) = &self.repo {
            if let Err(err) = repo.delete_favorite(id) {
                warn!(
                    "event=favorite_persist module=favorites status=error op=delete quote_id={id} error={err}"
                );
            }
        }
        true
    }

    /// Flips membership for `quote` and returns the new state.
    pub fn toggle(&mut self, quote: &Quote) -> bool {
        if self.remove(&quote.id) {
            false
        } else {
            self.add(quote.clone())
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.entries.iter().any(|quote| quote.id == id)
    }

    /// Current favorites in insertion order.
    pub fn list(&self) -> &[Quote] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FavoritesStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn dedupe_by_id(quotes: Vec<Quote>) -> Vec<Quote> {
    let mut unique: Vec<Quote> = Vec::with_capacity(quotes.len());
    for quote in quotes {
        if !unique.iter().any(|existing| existing.id == quote.id) {
            unique.push(quote);
        }
    }
    unique
}
