mod errors;
mod filter;
mod models;
mod store;
mod validation;

pub use errors::{CatalogError, CatalogResult};
pub use filter::BookFilter;
pub use models::{canonical_title, Book, BookId, NewBook, YearRange};
pub use store::{BookStore, BOOKS_LOG_TARGET};
