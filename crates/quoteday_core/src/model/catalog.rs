//! Read-only quote catalog.
//!
//! # Responsibility
//! - Hold the fixed quote list loaded once at process start.
//! - Provide order-preserving lookups for list rendering and selection.
//!
//! # Invariants
//! - A catalog is never empty.
//! - Quote ids are pairwise distinct.
//! - Contents never change after construction.

use crate::model::quote::{Category, Quote, QuoteValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Catalog construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Empty,
    DuplicateId(String),
    InvalidQuote(QuoteValidationError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "catalog must contain at least one quote"),
            Self::DuplicateId(id) => write!(f, "duplicate quote id in catalog: {id}"),
            Self::InvalidQuote(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidQuote(err) => Some(err),
            Self::Empty | Self::DuplicateId(_) => None,
        }
    }
}

impl From<QuoteValidationError> for CatalogError {
    fn from(value: QuoteValidationError) -> Self {
        Self::InvalidQuote(value)
    }
}

/// Immutable, ordered, non-empty list of quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    quotes: Vec<Quote>,
}

impl Catalog {
    /// Builds a catalog from authored quotes.
    ///
    /// # Errors
    /// - [`CatalogError::Empty`] when `quotes` is empty.
    /// - [`CatalogError::InvalidQuote`] when any quote fails validation.
    /// - [`CatalogError::DuplicateId`] on the first repeated id.
    pub fn new(quotes: Vec<Quote>) -> Result<Self, CatalogError> {
        if quotes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(quotes.len());
        for quote in &quotes {
            quote.validate()?;
            if !seen.insert(quote.id.as_str()) {
                return Err(CatalogError::DuplicateId(quote.id.clone()));
            }
        }

        Ok(Self { quotes })
    }

    /// Returns the catalog shipped with the app.
    pub fn builtin() -> Self {
        let quotes = BUILTIN_QUOTES
            .iter()
            .map(|(id, text, author, category)| Quote {
                id: (*id).to_string(),
                text: (*text).to_string(),
                author: (*author).to_string(),
                category: *category,
            })
            .collect();
        Self { quotes }
    }

    /// Number of quotes; always at least one.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Always `false`; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// All quotes in authored order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.iter()
    }

    /// Looks up one quote by stable id.
    pub fn get(&self, id: &str) -> Option<&Quote> {
        self.quotes.iter().find(|quote| quote.id == id)
    }

    /// Number of quotes tagged with `category`.
    pub fn count_in(&self, category: Category) -> usize {
        self.quotes
            .iter()
            .filter(|quote| quote.category == category)
            .count()
    }
}

const BUILTIN_QUOTES: &[(&str, &str, &str, Category)] = &[
    (
        "1",
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
        Category::Motivation,
    ),
    (
        "2",
        "Life is what happens when you're busy making other plans.",
        "John Lennon",
        Category::Life,
    ),
    (
        "3",
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
        Category::Motivation,
    ),
    (
        "4",
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "Winston Churchill",
        Category::Success,
    ),
    (
        "5",
        "In the middle of difficulty lies opportunity.",
        "Albert Einstein",
        Category::Wisdom,
    ),
    (
        "6",
        "The best way to predict the future is to create it.",
        "Peter Drucker",
        Category::Leadership,
    ),
    (
        "7",
        "Everything you've ever wanted is on the other side of fear.",
        "George Addair",
        Category::Motivation,
    ),
    (
        "8",
        "The only impossible journey is the one you never begin.",
        "Tony Robbins",
        Category::Motivation,
    ),
    (
        "9",
        "What you get by achieving your goals is not as important as what you become by achieving your goals.",
        "Zig Ziglar",
        Category::Success,
    ),
    (
        "10",
        "The journey of a thousand miles begins with one step.",
        "Lao Tzu",
        Category::Wisdom,
    ),
    (
        "11",
        "Your time is limited, don't waste it living someone else's life.",
        "Steve Jobs",
        Category::Life,
    ),
    (
        "12",
        "Innovation distinguishes between a leader and a follower.",
        "Steve Jobs",
        Category::Leadership,
    ),
    (
        "13",
        "The only limit to our realization of tomorrow is our doubts of today.",
        "Franklin D. Roosevelt",
        Category::Motivation,
    ),
    (
        "14",
        "Success usually comes to those who are too busy to be looking for it.",
        "Henry David Thoreau",
        Category::Success,
    ),
    (
        "15",
        "The mind is everything. What you think you become.",
        "Buddha",
        Category::Wisdom,
    ),
    (
        "16",
        "Do not watch the clock. Do what it does. Keep going.",
        "Sam Levenson",
        Category::Motivation,
    ),
    (
        "17",
        "The best revenge is massive success.",
        "Frank Sinatra",
        Category::Success,
    ),
    (
        "18",
        "Leadership is the capacity to translate vision into reality.",
        "Warren Bennis",
        Category::Leadership,
    ),
    (
        "19",
        "Life is 10% what happens to us and 90% how we react to it.",
        "Charles R. Swindoll",
        Category::Life,
    ),
    (
        "20",
        "The secret of getting ahead is getting started.",
        "Mark Twain",
        Category::Motivation,
    ),
];
