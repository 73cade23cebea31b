//! Translates client requests into `BookStore` calls.
//!
//! The service owns the boundary rules the store doesn't enforce (genre
//! vocabulary of filters, integer parameters) and decides what each
//! operation reports back. Writes hold the store's write lock for the whole
//! read-modify-report sequence, so the reported totals always describe the
//! state right after that write.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, error, info};

use super::params::{
    parse_optional_int, parse_required_int, split_genres, BookFilterParams, BookIdParams,
    PriceUpdateParams,
};
use crate::catalog_store::{
    Book, BookFilter, BookStore, CatalogError, CatalogResult, NewBook, BOOKS_LOG_TARGET,
};

pub type GuardedBookStore = Arc<RwLock<BookStore>>;

#[derive(Clone)]
pub struct CatalogService {
    store: GuardedBookStore,
}

fn log_failure<T>(operation: &str, result: CatalogResult<T>) -> CatalogResult<T> {
    if let Err(err) = &result {
        error!(target: BOOKS_LOG_TARGET, "{} failed: {}", operation, err);
    }
    result
}

impl CatalogService {
    pub fn new(store: BookStore) -> CatalogService {
        CatalogService {
            store: Arc::new(RwLock::new(store)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BookStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BookStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn total(&self) -> usize {
        self.read().total()
    }

    pub fn genres(&self) -> Vec<String> {
        self.read().genres().to_vec()
    }

    /// Parses filter parameters and checks requested genres against the
    /// store's vocabulary.
    fn build_filter(store: &BookStore, params: &BookFilterParams) -> CatalogResult<BookFilter> {
        let genres = match params.genres.as_deref() {
            None => None,
            Some(raw) => {
                let genres = split_genres(raw);
                if genres.is_empty() {
                    return Err(CatalogError::InvalidGenreFilter {
                        genre: raw.to_string(),
                        accepted: store.genres().to_vec(),
                    });
                }
                if let Some(unknown) = genres.iter().find(|g| !store.is_genre_known(g)) {
                    return Err(CatalogError::InvalidGenreFilter {
                        genre: unknown.clone(),
                        accepted: store.genres().to_vec(),
                    });
                }
                Some(genres)
            }
        };

        Ok(BookFilter {
            author: params.author.clone(),
            price_min: parse_optional_int(
                "price-bigger-than",
                params.price_bigger_than.as_deref(),
            )?,
            price_max: parse_optional_int("price-less-than", params.price_less_than.as_deref())?,
            year_min: parse_optional_int(
                "year-bigger-than",
                params.year_bigger_than.as_deref(),
            )?,
            year_max: parse_optional_int("year-less-than", params.year_less_than.as_deref())?,
            genres,
        })
    }

    /// Adds a book and reports the total number of books right after the
    /// insert.
    pub fn add_book(&self, new_book: NewBook) -> CatalogResult<usize> {
        debug!(
            target: BOOKS_LOG_TARGET,
            "Create request for Title [{}] | Author [{}] | Year [{}] | Price [{}] | Genres {:?}",
            new_book.title,
            new_book.author,
            new_book.year,
            new_book.price,
            new_book.genres
        );
        let mut store = self.write();
        let result = store.add(new_book).map(|id| {
            debug!(target: BOOKS_LOG_TARGET, "New Book assigned id [{}]", id);
            store.total()
        });
        log_failure("Create book", result)
    }

    pub fn count_books(&self, params: &BookFilterParams) -> CatalogResult<usize> {
        let store = self.read();
        let result = Self::build_filter(&store, params).map(|filter| {
            let count = store.count(&filter);
            info!(
                target: BOOKS_LOG_TARGET,
                "Total Books found for requested filters is {}", count
            );
            count
        });
        log_failure("Count books", result)
    }

    pub fn list_books(&self, params: &BookFilterParams) -> CatalogResult<Vec<Book>> {
        let store = self.read();
        let result = Self::build_filter(&store, params).map(|filter| {
            let books = store.list(&filter);
            info!(
                target: BOOKS_LOG_TARGET,
                "Total Books found for requested filters is {}", books.len()
            );
            books
        });
        log_failure("List books", result)
    }

    pub fn get_book(&self, params: &BookIdParams) -> CatalogResult<Book> {
        let result = parse_required_int("id", params.id.as_deref()).and_then(|id| {
            debug!(target: BOOKS_LOG_TARGET, "Fetching book id {} details", id);
            self.read()
                .get_by_id(id)
                .cloned()
                .ok_or(CatalogError::NotFound { id })
        });
        log_failure("Get book", result)
    }

    /// Updates a book's price and reports the price it had before.
    pub fn update_price(&self, params: &PriceUpdateParams) -> CatalogResult<i64> {
        let result = parse_required_int("id", params.id.as_deref()).and_then(|id| {
            let price = parse_required_int("price", params.price.as_deref())?;
            self.write().update_price(id, price)
        });
        log_failure("Update price", result)
    }

    /// Deletes a book and reports how many books are left.
    pub fn delete_book(&self, params: &BookIdParams) -> CatalogResult<usize> {
        let result = parse_required_int("id", params.id.as_deref()).and_then(|id| {
            let mut store = self.write();
            store.remove_by_id(id)?;
            let remaining = store.total();
            info!(
                target: BOOKS_LOG_TARGET,
                "After removing book id [{}] there are {} books in the system", id, remaining
            );
            Ok(remaining)
        });
        log_failure("Delete book", result)
    }
}
