use chrono::{Local, NaiveDate};
use crate::core::library::{LibraryError, LibraryResult};

pub const DATE_FMT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

pub fn parse_date(text: &str) -> LibraryResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FMT).map_err(|err| LibraryError::validation(
        format!("invalid date {:?}: {}", text, err).as_str(), Some("InvalidDate".to_string())))
}

pub mod option_serializer {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        date.map(|d| d.format(DATE_FMT).to_string()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let str_date: Option<String> = Deserialize::deserialize(deserializer)?;
        str_date.map(|s| NaiveDate::parse_from_str(&s, DATE_FMT).map_err(D::Error::custom)).transpose()
    }
}
