use crate::books::domain::model::BookEntity;
use crate::books::field::BookField;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Comparison {
    Greater,
    Less,
    Equal,
    Contains,
}

// Criterion is one field-comparator-value condition of a filter.
#[derive(Debug, PartialEq, Clone)]
pub struct Criterion {
    pub field: BookField,
    pub comparison: Comparison,
    pub value: String,
}

impl Criterion {
    // Returns None when the field name is unknown.
    pub fn parse(name: &str, raw: &str) -> Option<Criterion> {
        let field = BookField::parse(name)?;
        let raw = raw.trim().to_lowercase();
        let (comparison, value) = match field {
            BookField::Year => {
                if let Some(rest) = raw.strip_prefix('>') {
                    (Comparison::Greater, rest)
                } else if let Some(rest) = raw.strip_prefix('<') {
                    (Comparison::Less, rest)
                } else if let Some(rest) = raw.strip_prefix('=') {
                    (Comparison::Equal, rest)
                } else {
                    (Comparison::Equal, raw.as_str())
                }
            }
            BookField::Available => (Comparison::Equal, raw.as_str()),
            _ => (Comparison::Contains, raw.as_str()),
        };
        Some(Criterion { field, comparison, value: value.trim().to_string() })
    }

    pub fn matches(&self, book: &BookEntity) -> bool {
        if self.field == BookField::Year {
            // a non-numeric year matches nothing
            return match self.value.parse::<i32>() {
                Ok(threshold) => match self.comparison {
                    Comparison::Greater => book.publication_year > threshold,
                    Comparison::Less => book.publication_year < threshold,
                    _ => book.publication_year == threshold,
                },
                Err(_) => false,
            };
        }
        let actual = self.field.extract(book).to_lowercase();
        match self.comparison {
            Comparison::Contains => actual.contains(&self.value),
            _ => actual == self.value,
        }
    }
}
