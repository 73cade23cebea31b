//! Raw request parameters, as they come from the query string.
//!
//! Everything is kept as text until the service parses it, so a non-integer
//! value is reported with the parameter name instead of a generic
//! deserialization failure.

use serde::Deserialize;

use crate::catalog_store::{CatalogError, CatalogResult};

#[derive(Debug, Default, Clone, Deserialize)]
pub struct BookFilterParams {
    pub author: Option<String>,
    #[serde(rename = "price-bigger-than")]
    pub price_bigger_than: Option<String>,
    #[serde(rename = "price-less-than")]
    pub price_less_than: Option<String>,
    #[serde(rename = "year-bigger-than")]
    pub year_bigger_than: Option<String>,
    #[serde(rename = "year-less-than")]
    pub year_less_than: Option<String>,
    pub genres: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct BookIdParams {
    pub id: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PriceUpdateParams {
    pub id: Option<String>,
    pub price: Option<String>,
}

pub fn parse_int(name: &str, value: &str) -> CatalogResult<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        CatalogError::InvalidInput(format!(
            "Error: parameter [{}] must be an integer, got [{}]",
            name, value
        ))
    })
}

pub fn parse_optional_int(name: &str, value: Option<&str>) -> CatalogResult<Option<i64>> {
    value.map(|v| parse_int(name, v)).transpose()
}

pub fn parse_required_int(name: &str, value: Option<&str>) -> CatalogResult<i64> {
    match value {
        Some(v) => parse_int(name, v),
        None => Err(CatalogError::InvalidInput(format!(
            "Error: missing required parameter [{}]",
            name
        ))),
    }
}

/// Splits a comma-separated genre list, ignoring all whitespace and empty
/// entries.
pub fn split_genres(raw: &str) -> Vec<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split(',')
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}
