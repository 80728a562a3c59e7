use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::checkout::domain::CheckoutService;
use crate::core::command::{Command, CommandError};
use crate::utils::date::option_serializer;

pub struct BorrowBookCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl BorrowBookCommand {
    pub fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BorrowBookCommandRequest {
    pub isbn: String,
    pub borrower: String,
    #[serde(default, with = "option_serializer")]
    pub due_date: Option<NaiveDate>,
}

impl BorrowBookCommandRequest {
    pub fn new(isbn: &str, borrower: &str, due_date: Option<NaiveDate>) -> Self {
        Self {
            isbn: isbn.to_string(),
            borrower: borrower.to_string(),
            due_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BorrowBookCommandResponse {
    pub book: BookDto,
}

impl BorrowBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        self.checkout_service.checkout(req.isbn.as_str(), req.borrower.as_str(), req.due_date)
            .await.map_err(CommandError::from).map(BorrowBookCommandResponse::new)
    }
}
