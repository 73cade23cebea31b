use thiserror::Error;

use super::models::{BookId, YearRange};

/// Every way a catalog operation can be refused.
///
/// The `Display` text is what clients receive as `errorMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Error: Book with the title [{title}] already exists in the system")]
    DuplicateTitle { title: String },

    #[error("Error: Can't create new Book that its year [{year}] is not in the accepted range {range}")]
    YearOutOfRange { year: i64, range: YearRange },

    #[error("Error: Can't accept Book with negative price [{price}]")]
    InvalidPrice { price: i64 },

    #[error("Error: no such Book with id {id}")]
    NotFound { id: BookId },

    #[error("Error: genre [{genre}] is not one of the accepted genres {accepted:?}")]
    InvalidGenreFilter {
        genre: String,
        accepted: Vec<String>,
    },

    #[error("{0}")]
    InvalidInput(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
