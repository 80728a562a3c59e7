use std::collections::HashMap;
use chrono::NaiveDate;
use tracing::{debug, warn};
use crate::books::domain::model::BookEntity;
use crate::books::field::BookField;
use crate::books::validator::{normalize_isbn, validate_name};
use crate::catalog::domain::query::Criterion;
use crate::catalog::domain::stats::CatalogStats;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::date::today;

// CatalogStore owns every book of one catalog in insertion order. It never
// touches storage; see catalog::repository for load and save.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CatalogStore {
    books: Vec<BookEntity>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self { books: vec![] }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn all(&self) -> &[BookEntity] {
        &self.books
    }

    pub fn get(&self, isbn: &str) -> Option<&BookEntity> {
        self.position(isbn).map(|ndx| &self.books[ndx])
    }

    fn position(&self, isbn: &str) -> Option<usize> {
        let isbn = normalize_isbn(isbn);
        self.books.iter().position(|b| b.isbn() == isbn)
    }

    fn get_mut(&mut self, isbn: &str) -> LibraryResult<&mut BookEntity> {
        match self.position(isbn) {
            Some(ndx) => Ok(&mut self.books[ndx]),
            None => Err(LibraryError::not_found(format!("book not found for {}", isbn).as_str())),
        }
    }

    pub fn create(&mut self, book: BookEntity) -> LibraryResult<usize> {
        if self.position(book.isbn()).is_some() {
            return Err(LibraryError::duplicate_key(
                format!("book with isbn {} already exists", book.isbn()).as_str()));
        }
        self.books.push(book);
        Ok(1)
    }

    pub fn delete(&mut self, isbn: &str) -> LibraryResult<BookEntity> {
        match self.position(isbn) {
            Some(ndx) => Ok(self.books.remove(ndx)),
            None => Err(LibraryError::not_found(format!("book not found for {}", isbn).as_str())),
        }
    }

    // Applies each field on its own. Fields that fail to parse or validate
    // are logged and skipped; returns how many fields were applied.
    pub fn update(&mut self, isbn: &str, updates: &HashMap<String, String>) -> LibraryResult<usize> {
        let book = self.get_mut(isbn)?;
        let mut applied = 0;
        for (name, value) in updates {
            let result = match BookField::parse(name) {
                Some(field) => field.apply(book, value),
                None => Err(LibraryError::validation(
                    format!("unknown field {}", name).as_str(), Some("InvalidAttribute".to_string()))),
            };
            match result {
                Ok(()) => applied += 1,
                Err(err) => warn!("skipping update of {} for book {}: {}", name, isbn, err),
            }
        }
        Ok(applied)
    }

    pub fn search(&self, field: &str, value: &str) -> Vec<&BookEntity> {
        let Some(field) = BookField::parse(field) else {
            warn!("search on unknown field {}", field);
            return vec![];
        };
        let needle = value.to_lowercase();
        self.books.iter()
            .filter(|book| field.extract(book).to_lowercase().contains(&needle))
            .collect()
    }

    // Criteria are ANDed; a criterion on an unknown field matches nothing.
    pub fn filter(&self, criteria: &HashMap<String, String>) -> Vec<&BookEntity> {
        let mut parsed = vec![];
        for (name, value) in criteria {
            match Criterion::parse(name, value) {
                Some(criterion) => parsed.push(criterion),
                None => {
                    warn!("filter on unknown field {}", name);
                    return vec![];
                }
            }
        }
        self.books.iter()
            .filter(|book| parsed.iter().all(|criterion| criterion.matches(book)))
            .collect()
    }

    // Stable in-place sort; an unsortable key leaves the order untouched.
    pub fn sort(&mut self, field: &str, ascending: bool) -> LibraryResult<()> {
        let comparator = BookField::parse(field).and_then(|f| f.comparator());
        let Some(comparator) = comparator else {
            warn!("invalid sort attribute {}", field);
            return Err(LibraryError::validation(
                format!("invalid sort attribute {}", field).as_str(), Some("InvalidAttribute".to_string())));
        };
        if ascending {
            self.books.sort_by(comparator);
        } else {
            self.books.sort_by(|a, b| comparator(b, a));
        }
        debug!("books sorted by {} ({})", field, if ascending { "ascending" } else { "descending" });
        Ok(())
    }

    pub fn borrow(&mut self, isbn: &str, borrower: &str, due_date: Option<NaiveDate>) -> LibraryResult<&BookEntity> {
        self.borrow_on(isbn, borrower, today(), due_date)
    }

    pub(crate) fn borrow_on(&mut self, isbn: &str, borrower: &str, borrow_date: NaiveDate,
                            due_date: Option<NaiveDate>) -> LibraryResult<&BookEntity> {
        let borrower = validate_name("borrower", borrower)?;
        let book = self.get_mut(isbn)?;
        book.borrow_on(&borrower, borrow_date, due_date)?;
        Ok(book)
    }

    pub fn return_book(&mut self, isbn: &str) -> LibraryResult<&BookEntity> {
        let book = self.get_mut(isbn)?;
        book.return_book()?;
        Ok(book)
    }

    pub fn stats(&self, top_borrowers: usize) -> CatalogStats {
        self.stats_as_of(today(), top_borrowers)
    }

    pub fn stats_as_of(&self, today: NaiveDate, top_borrowers: usize) -> CatalogStats {
        CatalogStats::compute(&self.books, today, top_borrowers)
    }
}
