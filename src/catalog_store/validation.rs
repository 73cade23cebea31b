//! Validation for catalog entities.
//!
//! Checks run in a fixed order and the first failure wins, so a candidate
//! with several problems always reports the same one.

use super::errors::{CatalogError, CatalogResult};
use super::models::{NewBook, YearRange};

pub fn validate_year(year: i64, range: &YearRange) -> CatalogResult<()> {
    if !range.contains(year) {
        return Err(CatalogError::YearOutOfRange {
            year,
            range: *range,
        });
    }
    Ok(())
}

pub fn validate_price(price: i64) -> CatalogResult<()> {
    if price <= 0 {
        return Err(CatalogError::InvalidPrice { price });
    }
    Ok(())
}

/// Validate the fields of a candidate book that don't depend on the other
/// stored records. Title uniqueness is checked by the store before this.
pub fn validate_new_book(book: &NewBook, range: &YearRange) -> CatalogResult<()> {
    validate_year(book.year, range)?;
    validate_price(book.price)?;
    Ok(())
}
