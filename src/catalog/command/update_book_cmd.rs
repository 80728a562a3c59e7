use std::collections::HashMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct UpdateBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

// Field names follow the catalog attribute names; unknown or invalid
// fields are skipped while the rest are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateBookCommandRequest {
    pub isbn: String,
    pub updates: HashMap<String, String>,
}

impl UpdateBookCommandRequest {
    pub fn new(isbn: &str, updates: &[(&str, &str)]) -> Self {
        Self {
            isbn: isbn.to_string(),
            updates: updates.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        self.catalog_service.update_book(req.isbn.as_str(), &req.updates).await
            .map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}
