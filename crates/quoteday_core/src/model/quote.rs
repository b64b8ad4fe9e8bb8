//! Quote domain model.
//!
//! # Responsibility
//! - Define the canonical quote record shared by selection, favorites and
//!   reminder payloads.
//! - Define the closed category enumeration and its display metadata.
//!
//! # Invariants
//! - `id` is stable and never reused for another quote.
//! - `text` and `author` are never blank.
//! - Every quote category is a member of [`Category::ALL`].

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier assigned at catalog-authoring time.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type QuoteId = String;

/// Closed set of quote categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Motivation,
    Success,
    Wisdom,
    Leadership,
    Life,
}

/// Wire value for the motivation category.
pub const CATEGORY_MOTIVATION: &str = "motivation";
/// Wire value for the success category.
pub const CATEGORY_SUCCESS: &str = "success";
/// Wire value for the wisdom category.
pub const CATEGORY_WISDOM: &str = "wisdom";
/// Wire value for the leadership category.
pub const CATEGORY_LEADERSHIP: &str = "leadership";
/// Wire value for the life category.
pub const CATEGORY_LIFE: &str = "life";

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 5] = [
        Category::Motivation,
        Category::Success,
        Category::Wisdom,
        Category::Leadership,
        Category::Life,
    ];

    /// Stable string id used in storage and across FFI.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Motivation => CATEGORY_MOTIVATION,
            Self::Success => CATEGORY_SUCCESS,
            Self::Wisdom => CATEGORY_WISDOM,
            Self::Leadership => CATEGORY_LEADERSHIP,
            Self::Life => CATEGORY_LIFE,
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Motivation => "Motivation",
            Self::Success => "Success",
            Self::Wisdom => "Wisdom",
            Self::Leadership => "Leadership",
            Self::Life => "Life",
        }
    }

    /// Icon glyph rendered next to the display name.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Motivation => "🔥",
            Self::Success => "🏆",
            Self::Wisdom => "🧠",
            Self::Leadership => "👑",
            Self::Life => "🌱",
        }
    }

    /// Parses one category from its string id.
    ///
    /// Matching is exact on the lowercase id after trimming. Unknown values
    /// return `None`; callers treat that as "no quotes match".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            CATEGORY_MOTIVATION => Some(Self::Motivation),
            CATEGORY_SUCCESS => Some(Self::Success),
            CATEGORY_WISDOM => Some(Self::Wisdom),
            CATEGORY_LEADERSHIP => Some(Self::Leadership),
            CATEGORY_LIFE => Some(Self::Life),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for quote invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteValidationError {
    BlankId,
    BlankText { id: QuoteId },
    BlankAuthor { id: QuoteId },
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "quote id must not be blank"),
            Self::BlankText { id } => write!(f, "quote `{id}` has blank text"),
            Self::BlankAuthor { id } => write!(f, "quote `{id}` has blank author"),
        }
    }
}

impl Error for QuoteValidationError {}

/// Canonical immutable quote record.
///
/// Deserialization runs [`Quote::validate`], so decoded quotes hold the same
/// invariants as ones built with [`Quote::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "QuoteRecord")]
pub struct Quote {
    /// Stable identity; equality of ids means "same quote".
    pub id: QuoteId,
    pub text: String,
    pub author: String,
    pub category: Category,
}

impl Quote {
    /// Creates a quote and validates its invariants.
    pub fn new(
        id: impl Into<QuoteId>,
        text: impl Into<String>,
        author: impl Into<String>,
        category: Category,
    ) -> Result<Self, QuoteValidationError> {
        let quote = Self {
            id: id.into(),
            text: text.into(),
            author: author.into(),
            category,
        };
        quote.validate()?;
        Ok(quote)
    }

    /// Checks field invariants.
    ///
    /// # Errors
    /// - [`QuoteValidationError::BlankId`] when `id` is empty or whitespace.
    /// - [`QuoteValidationError::BlankText`] / [`QuoteValidationError::BlankAuthor`]
    ///   when the respective field is empty or whitespace.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        if self.id.trim().is_empty() {
            return Err(QuoteValidationError::BlankId);
        }
        if self.text.trim().is_empty() {
            return Err(QuoteValidationError::BlankText {
                id: self.id.clone(),
            });
        }
        if self.author.trim().is_empty() {
            return Err(QuoteValidationError::BlankAuthor {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Text used for sharing and reminder bodies: `"text" - author`.
    pub fn attributed(&self) -> String {
        format!("\"{}\" - {}", self.text, self.author)
    }

    /// Text handed to the speech engine: `text by author`.
    pub fn spoken(&self) -> String {
        format!("{} by {}", self.text, self.author)
    }
}

/// Unvalidated wire shape of [`Quote`].
#[derive(Deserialize)]
struct QuoteRecord {
    id: QuoteId,
    text: String,
    author: String,
    category: Category,
}

impl TryFrom<QuoteRecord> for Quote {
    type Error = QuoteValidationError;

    fn try_from(record: QuoteRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.text, record.author, record.category)
    }
}
