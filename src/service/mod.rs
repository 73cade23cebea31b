mod catalog_service;
mod envelope;
mod params;

pub use catalog_service::{CatalogService, GuardedBookStore};
pub use envelope::{status_for, Envelope, ServiceResponse};
pub use params::{BookFilterParams, BookIdParams, PriceUpdateParams};
