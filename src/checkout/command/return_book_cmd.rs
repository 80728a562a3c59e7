use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::checkout::domain::CheckoutService;
use crate::core::command::{Command, CommandError};

pub struct ReturnBookCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl ReturnBookCommand {
    pub fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReturnBookCommandRequest {
    pub isbn: String,
}

impl ReturnBookCommandRequest {
    pub fn new(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReturnBookCommandResponse {
    pub book: BookDto,
}

impl ReturnBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.checkout_service.returned(req.isbn.as_str())
            .await.map_err(CommandError::from).map(ReturnBookCommandResponse::new)
    }
}
