use std::env;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::warn;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
}

pub const DEFAULT_DATA_FILE: &str = "data/books.txt";

// Configuration abstracts config options for the catalog engine
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub data_file: String,
    // 0 means loans without a due date
    pub book_loan_days: i64,
    pub top_borrowers: usize,
    pub autosave: bool,
}

impl Configuration {
    pub fn new(data_file: &str) -> Self {
        Configuration {
            data_file: data_file.to_string(),
            book_loan_days: 14,
            top_borrowers: 5,
            autosave: false,
        }
    }

    // Defaults overridden by LMS_* environment variables.
    pub fn from_env() -> Self {
        let mut config = Configuration::new(
            env::var("LMS_DATA_FILE").unwrap_or_else(|_| DEFAULT_DATA_FILE.to_string()).as_str());
        if let Some(days) = env_value("LMS_BOOK_LOAN_DAYS") {
            config.book_loan_days = days;
        }
        if let Some(limit) = env_value("LMS_TOP_BORROWERS") {
            config.top_borrowers = limit;
        }
        if let Some(autosave) = env_value("LMS_AUTOSAVE") {
            config.autosave = autosave;
        }
        config
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(DEFAULT_DATA_FILE)
    }
}

fn env_value<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring unparsable {}={}", name, raw);
            None
        }
    }
}
