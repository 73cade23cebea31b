//! In-memory book catalog.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use super::errors::{CatalogError, CatalogResult};
use super::filter::BookFilter;
use super::models::{canonical_title, Book, BookId, NewBook, YearRange};
use super::validation::{validate_new_book, validate_price};

pub const BOOKS_LOG_TARGET: &str = "books-logger";

/// The book table plus the configuration it was created with.
///
/// Ids start at 1 and are never reused, even after a deletion. Books are
/// kept keyed by id, which makes iteration order the insertion order.
pub struct BookStore {
    genres: Vec<String>,
    year_range: YearRange,
    books: BTreeMap<BookId, Book>,
    titles: HashMap<String, BookId>,
    next_id: BookId,
}

impl BookStore {
    pub fn new(genres: Vec<String>, year_range: YearRange) -> CatalogResult<BookStore> {
        if genres.is_empty() {
            return Err(CatalogError::InvalidInput(
                "Error: the genre vocabulary must not be empty".to_string(),
            ));
        }
        if let Some(blank) = genres.iter().find(|g| g.trim().is_empty()) {
            return Err(CatalogError::InvalidInput(format!(
                "Error: genre [{}] is blank",
                blank
            )));
        }

        Ok(BookStore {
            genres,
            year_range,
            books: BTreeMap::new(),
            titles: HashMap::new(),
            next_id: 1,
        })
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn is_genre_known(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    pub fn year_range(&self) -> YearRange {
        self.year_range
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new book and returns the id it was given.
    ///
    /// Nothing is mutated unless every check passes: title uniqueness first,
    /// then year range, then price.
    pub fn add(&mut self, new_book: NewBook) -> CatalogResult<BookId> {
        let title = canonical_title(&new_book.title);
        if self.titles.contains_key(&title) {
            return Err(CatalogError::DuplicateTitle { title });
        }
        validate_new_book(&new_book, &self.year_range)?;

        let id = self.next_id;
        self.next_id += 1;

        let book = Book::from_new(id, new_book);
        info!(target: BOOKS_LOG_TARGET, "Creating new Book with Title [{}]", book.title);
        self.titles.insert(book.title.clone(), id);
        self.books.insert(id, book);

        Ok(id)
    }

    /// Sets a new price and returns the previous one.
    pub fn update_price(&mut self, id: BookId, new_price: i64) -> CatalogResult<i64> {
        let book = self
            .books
            .get_mut(&id)
            .ok_or(CatalogError::NotFound { id })?;
        validate_price(new_price)?;

        let old_price = std::mem::replace(&mut book.price, new_price);
        info!(
            target: BOOKS_LOG_TARGET,
            "Update Book id [{}] price to {}", id, new_price
        );
        debug!(
            target: BOOKS_LOG_TARGET,
            "Book [{}] price change: {} --> {}", book.title, old_price, new_price
        );
        Ok(old_price)
    }

    pub fn remove_by_id(&mut self, id: BookId) -> CatalogResult<Book> {
        let book = self.books.remove(&id).ok_or(CatalogError::NotFound { id })?;
        self.titles.remove(&book.title);
        info!(
            target: BOOKS_LOG_TARGET,
            "Removing book [{}]", book.title
        );
        Ok(book)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn total(&self) -> usize {
        self.books.len()
    }

    pub fn contains_id(&self, id: BookId) -> bool {
        self.books.contains_key(&id)
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.titles.contains_key(&canonical_title(title))
    }

    pub fn get_by_id(&self, id: BookId) -> Option<&Book> {
        self.books.get(&id)
    }

    pub fn count(&self, filter: &BookFilter) -> usize {
        if filter.is_empty() {
            return self.total();
        }
        debug!(target: BOOKS_LOG_TARGET, "Counting books matching {:?}", filter);
        let matcher = filter.matcher();
        self.books.values().filter(|b| matcher(*b)).count()
    }

    /// Matching books sorted by title.
    pub fn list(&self, filter: &BookFilter) -> Vec<Book> {
        let matcher = filter.matcher();
        let mut books: Vec<Book> = self
            .books
            .values()
            .filter(|b| matcher(*b))
            .cloned()
            .collect();
        books.sort_by_key(|b| b.title.to_lowercase());
        books
    }
}
