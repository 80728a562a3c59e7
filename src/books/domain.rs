use chrono::NaiveDate;
use crate::core::domain::Identifiable;

pub mod model;

pub trait Book: Identifiable {
    fn is_available(&self) -> bool;
    fn borrower(&self) -> Option<&str>;
    // borrowed with a due date strictly before `today`
    fn is_overdue(&self, today: NaiveDate) -> bool;
}
