use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq)]
pub enum LibraryError {
    // A field failed its syntax rule at the record-creation boundary, or an
    // operation was asked for an attribute that does not exist.
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    // A single persisted line could not be turned back into a book.
    Decode {
        message: String,
        line: Option<usize>,
    },
    NotFound {
        message: String,
    },
    DuplicateKey {
        message: String,
    },
    AlreadyBorrowed {
        message: String,
        borrower: String,
    },
    NotBorrowed {
        message: String,
    },
    // Storage could not be read or written; the in-memory catalog is untouched.
    Io {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
}

impl LibraryError {
    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn decode(message: &str, line: Option<usize>) -> LibraryError {
        LibraryError::Decode { message: message.to_string(), line }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn already_borrowed(message: &str, borrower: &str) -> LibraryError {
        LibraryError::AlreadyBorrowed { message: message.to_string(), borrower: borrower.to_string() }
    }

    pub fn not_borrowed(message: &str) -> LibraryError {
        LibraryError::NotBorrowed { message: message.to_string() }
    }

    pub fn io(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Io { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    // decode errors carry the 1-based line number once the gateway knows it
    pub fn at_line(self, number: usize) -> LibraryError {
        match self {
            LibraryError::Decode { message, .. } => LibraryError::Decode { message, line: Some(number) },
            other => other,
        }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Validation { .. } => { false }
            LibraryError::Decode { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::AlreadyBorrowed { .. } => { false }
            LibraryError::NotBorrowed { .. } => { false }
            LibraryError::Io { .. } => { true }
            LibraryError::Serialization { .. } => { false }
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::io(
            format!("catalog io {:?}", err).as_str(), Some(format!("{:?}", err.kind())))
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Decode { message, line } => {
                match line {
                    Some(line) => write!(f, "line {}: {}", line, message),
                    None => write!(f, "{}", message),
                }
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::AlreadyBorrowed { message, borrower } => {
                write!(f, "{} (borrowed by {})", message, borrower)
            }
            LibraryError::NotBorrowed { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Io { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for catalog operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

// Genre is the closed set of tags a book can carry. Declaration order is the
// ordinal used for sorting.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    Romance,
    Fantasy,
    ScienceFiction,
    Mystery,
    Thriller,
    NonFiction,
    Biography,
    History,
    SelfHelp,
    Children,
    YoungAdult,
    Classic,
    Horror,
    Adventure,
    Poetry,
    Comics,
    GraphicNovel,
    Cookbook,
    Travel,
    Religion,
}

impl Genre {
    pub const ALL: [Genre; 20] = [
        Genre::Romance,
        Genre::Fantasy,
        Genre::ScienceFiction,
        Genre::Mystery,
        Genre::Thriller,
        Genre::NonFiction,
        Genre::Biography,
        Genre::History,
        Genre::SelfHelp,
        Genre::Children,
        Genre::YoungAdult,
        Genre::Classic,
        Genre::Horror,
        Genre::Adventure,
        Genre::Poetry,
        Genre::Comics,
        Genre::GraphicNovel,
        Genre::Cookbook,
        Genre::Travel,
        Genre::Religion,
    ];

    // Token as written to storage, e.g. SCIENCE_FICTION.
    pub fn token(&self) -> &'static str {
        match self {
            Genre::Romance => "ROMANCE",
            Genre::Fantasy => "FANTASY",
            Genre::ScienceFiction => "SCIENCE_FICTION",
            Genre::Mystery => "MYSTERY",
            Genre::Thriller => "THRILLER",
            Genre::NonFiction => "NON_FICTION",
            Genre::Biography => "BIOGRAPHY",
            Genre::History => "HISTORY",
            Genre::SelfHelp => "SELF_HELP",
            Genre::Children => "CHILDREN",
            Genre::YoungAdult => "YOUNG_ADULT",
            Genre::Classic => "CLASSIC",
            Genre::Horror => "HORROR",
            Genre::Adventure => "ADVENTURE",
            Genre::Poetry => "POETRY",
            Genre::Comics => "COMICS",
            Genre::GraphicNovel => "GRAPHIC_NOVEL",
            Genre::Cookbook => "COOKBOOK",
            Genre::Travel => "TRAVEL",
            Genre::Religion => "RELIGION",
        }
    }

    // Resolves free text such as "science fiction" or "Non_Fiction".
    pub fn parse(text: &str) -> LibraryResult<Genre> {
        let normalized = text.trim().to_uppercase().replace(' ', "_");
        Genre::ALL.iter()
            .find(|genre| genre.token() == normalized)
            .copied()
            .ok_or_else(|| LibraryError::validation(
                format!("invalid genre: {}", text).as_str(), Some("InvalidGenre".to_string())))
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
