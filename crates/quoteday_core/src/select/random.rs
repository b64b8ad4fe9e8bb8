//! Random and category-based quote selection.
//!
//! # Responsibility
//! - Draw a uniform random quote, optionally avoiding the one on screen.
//! - Return the category subset of the catalog in catalog order.
//!
//! # Invariants
//! - The repeat guard compares quote text, not id.
//! - When every quote shares the excluded text the guard is dropped instead
//!   of spinning.

use crate::model::catalog::Catalog;
use crate::model::quote::{Category, Quote};
use rand::Rng;

/// Draws one quote uniformly at random.
///
/// When `exclude_text` is set, quotes with exactly that text are skipped so
/// the "new quote" action never shows the same quote twice in a row. If no
/// quote remains after exclusion (for example a single-entry catalog), the
/// draw falls back to the whole catalog.
///
/// The catalog is non-empty by construction, so this never fails.
pub fn pick_random<'c, R: Rng + ?Sized>(
    catalog: &'c Catalog,
    exclude_text: Option<&str>,
    rng: &mut R,
) -> &'c Quote {
    let quotes = catalog.quotes();

    if let Some(excluded) = exclude_text {
        let candidates = quotes
            .iter()
            .filter(|quote| quote.text != excluded)
            .collect::<Vec<_>>();
        if !candidates.is_empty() {
            return candidates[rng.random_range(0..candidates.len())];
        }
    }

    &quotes[rng.random_range(0..quotes.len())]
}

/// [`pick_random`] using the thread-local generator.
pub fn random_quote<'c>(catalog: &'c Catalog, exclude_text: Option<&str>) -> &'c Quote {
    pick_random(catalog, exclude_text, &mut rand::rng())
}

/// Returns every quote tagged with `category`, preserving catalog order.
///
/// An empty result is valid and means no quote matches.
pub fn pick_random_by_category(catalog: &Catalog, category: Category) -> Vec<&Quote> {
    catalog
        .iter()
        .filter(|quote| quote.category == category)
        .collect()
}

/// String form of [`pick_random_by_category`] for route/FFI callers.
///
/// Unknown category names yield an empty result rather than an error.
pub fn pick_random_by_category_name<'c>(catalog: &'c Catalog, name: &str) -> Vec<&'c Quote> {
    match Category::parse(name) {
        Some(category) => pick_random_by_category(catalog, category),
        None => Vec::new(),
    }
}
