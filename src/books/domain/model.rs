use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::field::BookField;
use crate::core::domain::Identifiable;
use crate::core::library::{Genre, LibraryError, LibraryResult};
use crate::utils::date::{format_date, today};

// BorrowState couples the loan metadata to availability so a borrower
// can never exist without a borrow date, or vice versa.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum BorrowState {
    Available,
    Borrowed {
        borrower: String,
        borrow_date: NaiveDate,
        due_date: Option<NaiveDate>,
    },
}

// BookEntity is a single catalog record keyed by its normalized isbn.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct BookEntity {
    pub(crate) isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub publication_year: i32,
    pub genre: Genre,
    pub(crate) borrow_state: BorrowState,
}

impl BookEntity {
    // Builds an available book without running the field rules; use
    // validator::validate_for_create at the boundary.
    pub fn new(isbn: &str, title: &str, author: &str, publisher: &str,
               publication_year: i32, genre: Genre) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            publisher: publisher.to_string(),
            publication_year,
            genre,
            borrow_state: BorrowState::Available,
        }
    }

    pub fn with_borrow_state(mut self, borrow_state: BorrowState) -> Self {
        self.borrow_state = borrow_state;
        self
    }

    pub fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    pub fn borrow_state(&self) -> &BorrowState {
        &self.borrow_state
    }

    pub fn borrow_date(&self) -> Option<NaiveDate> {
        match &self.borrow_state {
            BorrowState::Available => None,
            BorrowState::Borrowed { borrow_date, .. } => Some(*borrow_date),
        }
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        match &self.borrow_state {
            BorrowState::Available => None,
            BorrowState::Borrowed { due_date, .. } => *due_date,
        }
    }

    // Lends the book out as of today.
    pub fn borrow(&mut self, borrower: &str, due_date: Option<NaiveDate>) -> LibraryResult<()> {
        self.borrow_on(borrower, today(), due_date)
    }

    pub(crate) fn borrow_on(&mut self, borrower: &str, borrow_date: NaiveDate,
                            due_date: Option<NaiveDate>) -> LibraryResult<()> {
        if let BorrowState::Borrowed { borrower: current, .. } = &self.borrow_state {
            return Err(LibraryError::already_borrowed(
                format!("book {} is already borrowed", self.isbn).as_str(), current));
        }
        if borrower.trim().is_empty() {
            return Err(LibraryError::validation("borrower name is required", Some("InvalidName".to_string())));
        }
        self.borrow_state = BorrowState::Borrowed {
            borrower: borrower.to_string(),
            borrow_date,
            due_date,
        };
        Ok(())
    }

    pub fn return_book(&mut self) -> LibraryResult<()> {
        if self.borrow_state == BorrowState::Available {
            return Err(LibraryError::not_borrowed(
                format!("book {} is not currently borrowed", self.isbn).as_str()));
        }
        self.borrow_state = BorrowState::Available;
        Ok(())
    }

    // Case-insensitive name-keyed accessor; unknown names read as empty.
    pub fn get_field(&self, name: &str) -> String {
        BookField::parse(name).map(|field| field.extract(self)).unwrap_or_default()
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.isbn.to_string()
    }
}

impl Book for BookEntity {
    fn is_available(&self) -> bool {
        self.borrow_state == BorrowState::Available
    }

    fn borrower(&self) -> Option<&str> {
        match &self.borrow_state {
            BorrowState::Available => None,
            BorrowState::Borrowed { borrower, .. } => Some(borrower.as_str()),
        }
    }

    fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date().map(|due| due < today).unwrap_or(false)
    }
}

impl Display for BookEntity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let status = match &self.borrow_state {
            BorrowState::Available => "Available".to_string(),
            BorrowState::Borrowed { borrower, borrow_date, due_date } => format!(
                "Borrowed by {} on {} (Due: {})", borrower, format_date(borrow_date),
                due_date.as_ref().map(format_date).unwrap_or_else(|| "N/A".to_string())),
        };
        write!(f, "ISBN: {} | Title: {} | Author: {} | Publisher: {} | Year: {} | Genre: {} | Status: {}",
               self.isbn, self.title, self.author, self.publisher, self.publication_year, self.genre, status)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::books::domain::Book;
    use crate::books::domain::model::{BookEntity, BorrowState};
    use crate::core::library::{Genre, LibraryError};

    fn dune() -> BookEntity {
        BookEntity::new("0306406152", "Dune", "Herbert_Frank", "Chilton", 1965, Genre::ScienceFiction)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_should_build_available_book() {
        let book = dune();
        assert_eq!("0306406152", book.isbn());
        assert!(book.is_available());
        assert_eq!(None, book.borrower());
        assert_eq!(None, book.borrow_date());
    }

    #[test]
    fn test_should_borrow_and_return() {
        let mut book = dune();
        book.borrow_on("Doe_John", day(2024, 1, 1), Some(day(2024, 1, 15))).expect("should borrow");
        assert!(!book.is_available());
        assert_eq!(Some("Doe_John"), book.borrower());
        assert_eq!(Some(day(2024, 1, 1)), book.borrow_date());
        assert_eq!(Some(day(2024, 1, 15)), book.due_date());

        book.return_book().expect("should return");
        assert!(book.is_available());
        assert_eq!(BorrowState::Available, *book.borrow_state());
    }

    #[test]
    fn test_should_not_borrow_twice() {
        let mut book = dune();
        book.borrow_on("Doe_John", day(2024, 1, 1), None).unwrap();
        let before = book.clone();
        let err = book.borrow_on("Roe_Jane", day(2024, 1, 2), None).unwrap_err();
        assert!(matches!(err, LibraryError::AlreadyBorrowed{ ref borrower, .. } if borrower == "Doe_John"));
        assert_eq!(before, book);
    }

    #[test]
    fn test_should_not_return_available_book() {
        let mut book = dune();
        let err = book.return_book().unwrap_err();
        assert!(matches!(err, LibraryError::NotBorrowed{ .. }));
        assert_eq!(dune(), book);
    }

    #[test]
    fn test_should_detect_overdue() {
        let mut book = dune();
        assert!(!book.is_overdue(day(2024, 2, 1)));
        book.borrow_on("Doe_John", day(2024, 1, 1), Some(day(2024, 1, 15))).unwrap();
        assert!(!book.is_overdue(day(2024, 1, 15)));
        assert!(book.is_overdue(day(2024, 1, 16)));
    }

    #[test]
    fn test_should_get_fields_case_insensitive() {
        let mut book = dune();
        assert_eq!("Dune", book.get_field("TITLE"));
        assert_eq!("1965", book.get_field("publicationYear"));
        assert_eq!("SCIENCE_FICTION", book.get_field("genre"));
        assert_eq!("true", book.get_field("available"));
        assert_eq!("", book.get_field("borrower"));
        assert_eq!("", book.get_field("no_such_field"));
        book.borrow_on("Doe_John", day(2024, 3, 9), None).unwrap();
        assert_eq!("false", book.get_field("isAvailable"));
        assert_eq!("Doe_John", book.get_field("borrowerName"));
        assert_eq!("2024-03-09", book.get_field("borrowDate"));
        assert_eq!("", book.get_field("returnDueDate"));
    }

    #[test]
    fn test_should_display_status() {
        let mut book = dune();
        assert!(book.to_string().ends_with("Status: Available"));
        book.borrow_on("Doe_John", day(2024, 3, 9), None).unwrap();
        assert!(book.to_string().ends_with("Status: Borrowed by Doe_John on 2024-03-09 (Due: N/A)"));
    }
}
