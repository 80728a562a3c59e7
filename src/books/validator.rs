use chrono::Datelike;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;
use crate::core::library::{Genre, LibraryError, LibraryResult};
use crate::utils::date::today;

pub const MIN_YEAR: i32 = 1000;

lazy_static! {
    static ref NAME_PATTERN: Regex = Regex::new(r"^[A-Za-z]+_[A-Za-z]+$").expect("valid name pattern");
}

// BookFields carries the raw, unvalidated input for a new book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookFields {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: String,
    pub genre: String,
}

impl BookFields {
    pub fn new(isbn: &str, title: &str, author: &str, publisher: &str, year: &str, genre: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            publisher: publisher.to_string(),
            year: year.to_string(),
            genre: genre.to_string(),
        }
    }
}

// Runs every field rule and builds an available book; the first failing
// field is reported.
pub fn validate_for_create(fields: &BookFields) -> LibraryResult<BookEntity> {
    let isbn = normalize_isbn(&fields.isbn);
    if !is_valid_isbn(&isbn) {
        return Err(LibraryError::validation(
            format!("invalid isbn {:?}: must be 10 or 13 digits with a valid checksum", fields.isbn).as_str(),
            Some("InvalidIsbn".to_string())));
    }
    let title = sanitize_text("title", &fields.title)?;
    let author = validate_name("author", &fields.author)?;
    let publisher = sanitize_text("publisher", &fields.publisher)?;
    let year = parse_year(&fields.year)?;
    let genre = Genre::parse(&fields.genre)?;
    Ok(BookEntity::new(&isbn, &title, &author, &publisher, year, genre))
}

// Strips hyphens and uppercases the ISBN-10 check character.
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.trim().replace('-', "").to_uppercase()
}

pub fn is_valid_isbn(isbn: &str) -> bool {
    let clean = normalize_isbn(isbn);
    match clean.len() {
        10 => is_valid_isbn10(&clean),
        13 => is_valid_isbn13(&clean),
        _ => false,
    }
}

fn is_valid_isbn10(isbn: &str) -> bool {
    let mut sum = 0;
    for (i, c) in isbn.chars().enumerate() {
        let value = match (i, c) {
            (9, 'X') => 10,
            _ => match c.to_digit(10) {
                Some(digit) => digit,
                None => return false,
            },
        };
        // weights 10..2 for the body, 1 for the check character
        sum += (10 - i as u32) * value;
    }
    sum % 11 == 0
}

fn is_valid_isbn13(isbn: &str) -> bool {
    let digits: Vec<u32> = isbn.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 13 {
        return false;
    }
    let sum: u32 = digits.iter().take(12).enumerate()
        .map(|(i, digit)| if i % 2 == 0 { *digit } else { digit * 3 })
        .sum();
    (10 - sum % 10) % 10 == digits[12]
}

pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

// Names are stored as LastName_FirstName.
pub fn validate_name(field: &str, name: &str) -> LibraryResult<String> {
    let name = name.trim();
    if is_valid_name(name) {
        Ok(name.to_string())
    } else {
        Err(LibraryError::validation(
            format!("{} {:?} must be in format LastName_FirstName", field, name).as_str(),
            Some("InvalidName".to_string())))
    }
}

pub fn max_year() -> i32 {
    today().year() + 1
}

pub fn parse_year(text: &str) -> LibraryResult<i32> {
    let year = text.trim().parse::<i32>().map_err(|_| LibraryError::validation(
        format!("year {:?} is not a number", text).as_str(), Some("InvalidYear".to_string())))?;
    if year < MIN_YEAR || year > max_year() {
        return Err(LibraryError::validation(
            format!("year must be between {} and {}", MIN_YEAR, max_year()).as_str(),
            Some("InvalidYear".to_string())));
    }
    Ok(year)
}

// Trims and replaces the field and line separators; empty text is rejected.
pub fn sanitize_text(field: &str, text: &str) -> LibraryResult<String> {
    let clean = text.trim().replace(['|', '\r', '\n'], "_");
    if clean.is_empty() {
        return Err(LibraryError::validation(
            format!("{} must not be empty", field).as_str(), Some("EmptyField".to_string())));
    }
    Ok(clean)
}

pub fn parse_flag(text: &str) -> LibraryResult<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(LibraryError::validation(
            format!("{:?} is not one of true/false, yes/no, y/n, 1/0", text).as_str(),
            Some("InvalidBoolean".to_string()))),
    }
}
