//! Book catalog models.
//!
//! `NewBook` is what a client submits, `Book` is what the store keeps once an
//! id has been assigned and the title has been canonicalized.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{CatalogError, CatalogResult};

pub type BookId = i64;

/// Lower-cased form of a title, used both for storage and uniqueness checks.
pub fn canonical_title(title: &str) -> String {
    title.to_lowercase()
}

/// A candidate record, as received from a create request.
///
/// Every field is required and unknown fields are rejected, so a malformed
/// body fails at deserialization instead of producing a half-filled book.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub price: i64,
    pub genres: Vec<String>,
}

/// A stored record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub price: i64,
    pub genres: Vec<String>,
}

impl Book {
    pub(super) fn from_new(id: BookId, new_book: NewBook) -> Book {
        Book {
            id,
            title: canonical_title(&new_book.title),
            author: new_book.author,
            year: new_book.year,
            price: new_book.price,
            genres: new_book.genres,
        }
    }

    pub fn has_any_genre(&self, genres: &[String]) -> bool {
        self.genres.iter().any(|g| genres.contains(g))
    }
}

/// Inclusive range of accepted publication years.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    lower: i64,
    upper: i64,
}

impl YearRange {
    pub fn new(lower: i64, upper: i64) -> CatalogResult<YearRange> {
        if lower > upper {
            return Err(CatalogError::InvalidInput(format!(
                "Error: year range lower bound [{}] is greater than upper bound [{}]",
                lower, upper
            )));
        }
        Ok(YearRange { lower, upper })
    }

    pub fn lower(&self) -> i64 {
        self.lower
    }

    pub fn upper(&self) -> i64 {
        self.upper
    }

    pub fn contains(&self, year: i64) -> bool {
        self.lower <= year && year <= self.upper
    }
}

impl Default for YearRange {
    fn default() -> Self {
        YearRange {
            lower: 1940,
            upper: 2100,
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} -> {}]", self.lower, self.upper)
    }
}
