use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct RemoveBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl RemoveBookCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoveBookCommandRequest {
    pub isbn: String,
}

impl RemoveBookCommandRequest {
    pub fn new(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RemoveBookCommandResponse {
    pub book: BookDto,
}

impl RemoveBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<RemoveBookCommandRequest, RemoveBookCommandResponse> for RemoveBookCommand {
    async fn execute(&self, req: RemoveBookCommandRequest) -> Result<RemoveBookCommandResponse, CommandError> {
        self.catalog_service.remove_book(req.isbn.as_str()).await
            .map_err(CommandError::from).map(RemoveBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::books::validator::BookFields;
    use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory::{create_catalog_service, open_catalog};
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_remove_book() {
        let context = open_catalog(&Configuration::default(), RepositoryStore::InMemory).expect("should open catalog");
        let svc = create_catalog_service(&context);
        let _ = svc.add_book(&BookFields::new("0306406152", "Dune", "Herbert_Frank", "Chilton", "1965", "science fiction"))
            .await.expect("should add book");

        let cmd = RemoveBookCommand::new(create_catalog_service(&context));
        let res = cmd.execute(RemoveBookCommandRequest::new("0306406152")).await.expect("should remove book");
        assert_eq!("0306406152", res.book.isbn.as_str());
        assert!(svc.find_all().await.unwrap().is_empty());

        let err = cmd.execute(RemoveBookCommandRequest::new("0306406152")).await.unwrap_err();
        assert!(matches!(err, CommandError::NotFound{ .. }));
    }
}
