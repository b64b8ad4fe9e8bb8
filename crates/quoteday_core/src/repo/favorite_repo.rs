//! Favorite quote persistence.
//!
//! # Responsibility
//! - Persist the favorites list with its insertion order.
//! - Store the full quote payload so favorites render without the catalog.
//!
//! # Invariants
//! - Inserting an id that already exists keeps one row and moves it to the
//!   end of the order, matching what the in-memory store shows.
//! - Loaded rows come back in insertion order.

use crate::db::SharedConnection;
use crate::model::quote::{Category, Quote};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use std::sync::MutexGuard;

/// Persistence contract for the favorites store.
pub trait FavoriteRepository: Send {
    /// Loads every stored favorite in insertion order.
    fn load_favorites(&self) -> RepoResult<Vec<Quote>>;
    /// Appends one favorite; an existing row for the id is moved to the end.
    fn insert_favorite(&self, quote: &Quote) -> RepoResult<()>;
    /// Deletes one favorite; missing ids are ignored.
    fn delete_favorite(&self, id: &str) -> RepoResult<()>;
}

/// SQLite-backed favorites repository.
pub struct SqliteFavoriteRepository {
    conn: SharedConnection,
}

impl SqliteFavoriteRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| RepoError::Poisoned)
    }
}

impl FavoriteRepository for SqliteFavoriteRepository {
    fn load_favorites(&self) -> RepoResult<Vec<Quote>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT quote_id, text, author, category
             FROM favorites
             ORDER BY position ASC, quote_id ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut quotes = Vec::new();
        while let Some(row) = rows.next()? {
            quotes.push(parse_favorite_row(row)?);
        }
        Ok(quotes)
    }

    fn insert_favorite(&self, quote: &Quote) -> RepoResult<()> {
        quote.validate()?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO favorites (quote_id, text, author, category, position)
             VALUES (?1, ?2, ?3, ?4, (SELECT COALESCE(MAX(position), 0) + 1 FROM favorites))
             ON CONFLICT(quote_id) DO UPDATE SET
                text = excluded.text,
                author = excluded.author,
                category = excluded.category,
                position = excluded.position;",
            params![
                quote.id.as_str(),
                quote.text.as_str(),
                quote.author.as_str(),
                quote.category.as_str(),
            ],
        )?;
        Ok(())
    }

    fn delete_favorite(&self, id: &str) -> RepoResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM favorites WHERE quote_id = ?1;", [id])?;
        Ok(())
    }
}

fn parse_favorite_row(row: &Row<'_>) -> RepoResult<Quote> {
    let category_text: String = row.get("category")?;
    let category = Category::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in favorites.category"
        ))
    })?;

    let quote = Quote {
        id: row.get("quote_id")?,
        text: row.get("text")?,
        author: row.get("author")?,
        category,
    };
    quote.validate()?;
    Ok(quote)
}
