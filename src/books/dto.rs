use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::{BookEntity, BorrowState};
use crate::core::domain::Identifiable;
use crate::core::library::Genre;
use crate::utils::date::option_serializer;

// BookDto is a detached copy of a catalog record handed to callers; changing
// it never changes the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub publication_year: i32,
    pub genre: Genre,
    pub available: bool,
    pub borrower: Option<String>,
    #[serde(with = "option_serializer")]
    pub borrow_date: Option<NaiveDate>,
    #[serde(with = "option_serializer")]
    pub due_date: Option<NaiveDate>,
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.isbn.to_string()
    }
}

impl Book for BookDto {
    fn is_available(&self) -> bool {
        self.available
    }

    fn borrower(&self) -> Option<&str> {
        self.borrower.as_deref()
    }

    fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.available && self.due_date.map(|due| due < today).unwrap_or(false)
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        let (borrower, borrow_date, due_date) = match other.borrow_state() {
            BorrowState::Available => (None, None, None),
            BorrowState::Borrowed { borrower, borrow_date, due_date } => {
                (Some(borrower.to_string()), Some(*borrow_date), *due_date)
            }
        };
        Self {
            isbn: other.isbn().to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            publisher: other.publisher.to_string(),
            publication_year: other.publication_year,
            genre: other.genre,
            available: other.is_available(),
            borrower,
            borrow_date,
            due_date,
        }
    }
}
