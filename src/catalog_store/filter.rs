//! Multi-predicate book filter.
//!
//! Every field that is set contributes one predicate, unset fields contribute
//! nothing. The resulting predicates are ANDed; with none, everything matches.

use super::models::Book;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub author: Option<String>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
    /// A book matches if it shares at least one genre with this set.
    pub genres: Option<Vec<String>>,
}

type Predicate<'a> = Box<dyn Fn(&Book) -> bool + 'a>;

impl BookFilter {
    pub fn is_empty(&self) -> bool {
        self == &BookFilter::default()
    }

    fn predicates(&self) -> Vec<Predicate<'_>> {
        let mut predicates: Vec<Predicate<'_>> = Vec::new();

        if let Some(author) = &self.author {
            predicates.push(Box::new(move |b: &Book| &b.author == author));
        }
        if let Some(min) = self.price_min {
            predicates.push(Box::new(move |b: &Book| b.price >= min));
        }
        if let Some(max) = self.price_max {
            predicates.push(Box::new(move |b: &Book| b.price <= max));
        }
        if let Some(min) = self.year_min {
            predicates.push(Box::new(move |b: &Book| b.year >= min));
        }
        if let Some(max) = self.year_max {
            predicates.push(Box::new(move |b: &Book| b.year <= max));
        }
        if let Some(genres) = &self.genres {
            predicates.push(Box::new(move |b: &Book| b.has_any_genre(genres)));
        }

        predicates
    }

    /// Builds a matcher that can be applied to many books without
    /// re-evaluating which filter fields are set.
    pub fn matcher(&self) -> impl Fn(&Book) -> bool + '_ {
        let predicates = self.predicates();
        move |book| predicates.iter().all(|p| p(book))
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.matcher()(book)
    }
}
