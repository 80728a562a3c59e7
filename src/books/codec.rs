use chrono::NaiveDate;
use tracing::warn;
use crate::books::domain::model::{BookEntity, BorrowState};
use crate::books::validator::normalize_isbn;
use crate::core::library::{Genre, LibraryError, LibraryResult};
use crate::utils::date::{format_date, parse_date};

pub const HEADER: &str = "ISBN|Title|Author|Publisher|Year|Genre|Available|Borrower|BorrowDate|ReturnDueDate";
pub const SEPARATOR: char = '|';
pub const NULL_TOKEN: &str = "null";

const FIELD_COUNT: usize = 10;
// lines written before the due date existed stop after the borrow date
const MIN_FIELD_COUNT: usize = FIELD_COUNT - 1;

pub fn encode(book: &BookEntity) -> String {
    let (available, borrower, borrow_date, due_date) = match &book.borrow_state {
        BorrowState::Available => (true, None, None, None),
        BorrowState::Borrowed { borrower, borrow_date, due_date } => {
            (false, Some(borrower.as_str()), Some(*borrow_date), *due_date)
        }
    };
    [
        book.isbn.to_string(),
        book.title.to_string(),
        book.author.to_string(),
        book.publisher.to_string(),
        book.publication_year.to_string(),
        book.genre.to_string(),
        available.to_string(),
        borrower.unwrap_or(NULL_TOKEN).to_string(),
        encode_date(borrow_date),
        encode_date(due_date),
    ].join(&SEPARATOR.to_string())
}

fn encode_date(date: Option<NaiveDate>) -> String {
    date.as_ref().map(format_date).unwrap_or_else(|| NULL_TOKEN.to_string())
}

pub fn decode(line: &str) -> LibraryResult<BookEntity> {
    let parts: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(SEPARATOR).collect();
    if parts.len() < MIN_FIELD_COUNT || parts.len() > FIELD_COUNT {
        return Err(LibraryError::decode(
            format!("expected {} fields but found {}", FIELD_COUNT, parts.len()).as_str(), None));
    }
    let isbn = normalize_isbn(parts[0]);
    if isbn.is_empty() {
        return Err(LibraryError::decode("isbn is empty", None));
    }
    let year = parts[4].trim().parse::<i32>().map_err(|_| LibraryError::decode(
        format!("invalid year {:?}", parts[4]).as_str(), None))?;
    let genre = Genre::parse(parts[5]).map_err(|_| LibraryError::decode(
        format!("invalid genre {:?}", parts[5]).as_str(), None))?;
    let available = match parts[6].trim() {
        "true" => true,
        "false" => false,
        other => return Err(LibraryError::decode(
            format!("invalid available flag {:?}", other).as_str(), None)),
    };
    let borrower = decode_optional(parts[7]);
    let borrow_date = decode_date(parts[8])?;
    let due_date = match parts.get(9) {
        Some(text) => decode_date(text)?,
        None => None,
    };

    let borrow_state = if available {
        if borrower.is_some() || borrow_date.is_some() || due_date.is_some() {
            warn!("book {} is marked available, dropping its loan fields", isbn);
        }
        BorrowState::Available
    } else {
        match (borrower, borrow_date) {
            (Some(borrower), Some(borrow_date)) => BorrowState::Borrowed {
                borrower: borrower.to_string(),
                borrow_date,
                due_date,
            },
            _ => return Err(LibraryError::decode(
                "borrowed book is missing its borrower or borrow date", None)),
        }
    };
    Ok(BookEntity::new(&isbn, parts[1], parts[2], parts[3], year, genre).with_borrow_state(borrow_state))
}

fn decode_optional(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.is_empty() || text == NULL_TOKEN {
        None
    } else {
        Some(text)
    }
}

fn decode_date(text: &str) -> LibraryResult<Option<NaiveDate>> {
    decode_optional(text)
        .map(|value| parse_date(value).map_err(|err| LibraryError::decode(err.to_string().as_str(), None)))
        .transpose()
}
