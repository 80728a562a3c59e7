use async_trait::async_trait;
use chrono::NaiveDate;
use crate::books::dto::BookDto;
use crate::core::library::LibraryResult;

pub mod service;

#[async_trait]
pub trait CheckoutService: Sync + Send {
    // A missing due date falls back to the configured loan window.
    async fn checkout(&self, isbn: &str, borrower: &str, due_date: Option<NaiveDate>) -> LibraryResult<BookDto>;
    async fn returned(&self, isbn: &str) -> LibraryResult<BookDto>;
    async fn query_overdue(&self) -> LibraryResult<Vec<BookDto>>;
}
