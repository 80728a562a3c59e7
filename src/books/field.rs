use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::{BookEntity, BorrowState};
use crate::books::validator::{parse_flag, parse_year, sanitize_text, validate_name};
use crate::core::library::{Genre, LibraryError, LibraryResult};
use crate::utils::date::format_date;

// BookField is the closed set of attributes reachable by name. Search,
// filter, sort and update all dispatch through it.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum BookField {
    Isbn,
    Title,
    Author,
    Publisher,
    Year,
    Genre,
    Available,
    Borrower,
    BorrowDate,
    ReturnDueDate,
}

type Comparator = fn(&BookEntity, &BookEntity) -> Ordering;

impl BookField {
    pub const ALL: [BookField; 10] = [
        BookField::Isbn,
        BookField::Title,
        BookField::Author,
        BookField::Publisher,
        BookField::Year,
        BookField::Genre,
        BookField::Available,
        BookField::Borrower,
        BookField::BorrowDate,
        BookField::ReturnDueDate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BookField::Isbn => "isbn",
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Publisher => "publisher",
            BookField::Year => "year",
            BookField::Genre => "genre",
            BookField::Available => "available",
            BookField::Borrower => "borrower",
            BookField::BorrowDate => "borrowdate",
            BookField::ReturnDueDate => "returnduedate",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            BookField::Year => &["publicationyear"],
            BookField::Available => &["isavailable"],
            BookField::Borrower => &["borrowername"],
            _ => &[],
        }
    }

    pub fn parse(name: &str) -> Option<BookField> {
        let key = name.trim().to_lowercase();
        BookField::ALL.iter()
            .find(|field| field.name() == key || field.aliases().contains(&key.as_str()))
            .copied()
    }

    pub fn extract(&self, book: &BookEntity) -> String {
        match self {
            BookField::Isbn => book.isbn.to_string(),
            BookField::Title => book.title.to_string(),
            BookField::Author => book.author.to_string(),
            BookField::Publisher => book.publisher.to_string(),
            BookField::Year => book.publication_year.to_string(),
            BookField::Genre => book.genre.to_string(),
            BookField::Available => book.is_available().to_string(),
            BookField::Borrower => book.borrower().unwrap_or_default().to_string(),
            BookField::BorrowDate => book.borrow_date().as_ref().map(format_date).unwrap_or_default(),
            BookField::ReturnDueDate => book.due_date().as_ref().map(format_date).unwrap_or_default(),
        }
    }

    // Ascending order for sortable fields. Absent borrowers and borrow dates
    // sort first.
    pub fn comparator(&self) -> Option<Comparator> {
        let cmp: Comparator = match self {
            BookField::Isbn => |a, b| a.isbn.cmp(&b.isbn),
            BookField::Title => |a, b| a.title.cmp(&b.title),
            BookField::Author => |a, b| a.author.cmp(&b.author),
            BookField::Publisher => |a, b| a.publisher.cmp(&b.publisher),
            BookField::Year => |a, b| a.publication_year.cmp(&b.publication_year),
            BookField::Genre => |a, b| a.genre.cmp(&b.genre),
            BookField::Available => |a, b| a.is_available().cmp(&b.is_available()),
            BookField::Borrower => |a, b| a.borrower().cmp(&b.borrower()),
            BookField::BorrowDate => |a, b| a.borrow_date().cmp(&b.borrow_date()),
            BookField::ReturnDueDate => return None,
        };
        Some(cmp)
    }

    // Parses and validates `raw`, then writes it into `book`. On error the
    // book is left untouched.
    pub fn apply(&self, book: &mut BookEntity, raw: &str) -> LibraryResult<()> {
        match self {
            BookField::Title => {
                book.title = sanitize_text("title", raw)?;
            }
            BookField::Publisher => {
                book.publisher = sanitize_text("publisher", raw)?;
            }
            BookField::Author => {
                book.author = validate_name("author", raw)?;
            }
            BookField::Year => {
                book.publication_year = parse_year(raw)?;
            }
            BookField::Genre => {
                book.genre = Genre::parse(raw)?;
            }
            BookField::Available => {
                if parse_flag(raw)? {
                    book.borrow_state = BorrowState::Available;
                } else if book.borrow_state == BorrowState::Available {
                    return Err(LibraryError::validation(
                        "a book can only become unavailable by borrowing it", Some("InvalidState".to_string())));
                }
            }
            BookField::Isbn | BookField::Borrower | BookField::BorrowDate | BookField::ReturnDueDate => {
                return Err(LibraryError::validation(
                    format!("field {} cannot be updated directly", self).as_str(), Some("ReadOnlyField".to_string())));
            }
        }
        Ok(())
    }
}

impl Display for BookField {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use chrono::NaiveDate;
    use crate::books::domain::model::{BookEntity, BorrowState};
    use crate::books::field::BookField;
    use crate::core::library::{Genre, LibraryError};

    fn book(isbn: &str, year: i32) -> BookEntity {
        BookEntity::new(isbn, "Title", "Doe_John", "Pub", year, Genre::Fantasy)
    }

    fn borrowed(isbn: &str, borrower: &str, day: u32) -> BookEntity {
        book(isbn, 2000).with_borrow_state(BorrowState::Borrowed {
            borrower: borrower.to_string(),
            borrow_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            due_date: None,
        })
    }

    #[test]
    fn test_should_parse_names_and_aliases() {
        assert_eq!(Some(BookField::Year), BookField::parse("Year"));
        assert_eq!(Some(BookField::Year), BookField::parse("PUBLICATIONYEAR"));
        assert_eq!(Some(BookField::Available), BookField::parse("isAvailable"));
        assert_eq!(Some(BookField::Borrower), BookField::parse("borrowerName"));
        assert_eq!(Some(BookField::ReturnDueDate), BookField::parse("returnDueDate"));
        assert_eq!(None, BookField::parse("price"));
    }

    #[test]
    fn test_should_compare_absent_borrower_first() {
        let cmp = BookField::Borrower.comparator().unwrap();
        assert_eq!(Ordering::Less, cmp(&book("1", 2000), &borrowed("2", "Aa_Bb", 1)));
        let cmp = BookField::BorrowDate.comparator().unwrap();
        assert_eq!(Ordering::Less, cmp(&book("1", 2000), &borrowed("2", "Aa_Bb", 1)));
        assert_eq!(Ordering::Less, cmp(&borrowed("1", "Aa_Bb", 1), &borrowed("2", "Aa_Bb", 2)));
    }

    #[test]
    fn test_should_compare_available_false_first() {
        let cmp = BookField::Available.comparator().unwrap();
        assert_eq!(Ordering::Less, cmp(&borrowed("1", "Aa_Bb", 1), &book("2", 2000)));
    }

    #[test]
    fn test_should_not_sort_by_due_date() {
        assert!(BookField::ReturnDueDate.comparator().is_none());
    }

    #[test]
    fn test_should_apply_valid_values() {
        let mut b = book("1", 2000);
        BookField::Title.apply(&mut b, " Dune | Messiah ").unwrap();
        assert_eq!("Dune _ Messiah", b.title);
        BookField::Year.apply(&mut b, "1969").unwrap();
        assert_eq!(1969, b.publication_year);
        BookField::Genre.apply(&mut b, "science fiction").unwrap();
        assert_eq!(Genre::ScienceFiction, b.genre);
        BookField::Author.apply(&mut b, "Herbert_Frank").unwrap();
        assert_eq!("Herbert_Frank", b.author);
    }

    #[test]
    fn test_should_reject_invalid_values_untouched() {
        let mut b = book("1", 2000);
        assert!(BookField::Year.apply(&mut b, "abc").is_err());
        assert!(BookField::Author.apply(&mut b, "Frank Herbert").is_err());
        assert!(BookField::Genre.apply(&mut b, "space opera").is_err());
        assert!(BookField::Isbn.apply(&mut b, "9780306406157").is_err());
        assert_eq!(book("1", 2000), b);
    }

    #[test]
    fn test_should_apply_available_flag() {
        let mut b = borrowed("1", "Aa_Bb", 1);
        BookField::Available.apply(&mut b, "yes").unwrap();
        assert_eq!(BorrowState::Available, b.borrow_state);
        let err = BookField::Available.apply(&mut b, "false").unwrap_err();
        assert!(matches!(err, LibraryError::Validation{ .. }));
        BookField::Available.apply(&mut b, "true").unwrap();
        assert_eq!(BorrowState::Available, b.borrow_state);
    }
}
