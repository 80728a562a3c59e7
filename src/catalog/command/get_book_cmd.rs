use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct GetBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl GetBookCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetBookCommandRequest {
    pub isbn: String,
}

impl GetBookCommandRequest {
    pub fn new(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GetBookCommandResponse {
    pub book: BookDto,
}

impl GetBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<GetBookCommandRequest, GetBookCommandResponse> for GetBookCommand {
    async fn execute(&self, req: GetBookCommandRequest) -> Result<GetBookCommandResponse, CommandError> {
        self.catalog_service.find_book_by_isbn(req.isbn.as_str()).await
            .map_err(CommandError::from).map(GetBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::books::validator::BookFields;
    use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory::{create_catalog_service, open_catalog};
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_get_book() {
        let context = open_catalog(&Configuration::default(), RepositoryStore::InMemory).expect("should open catalog");
        let svc = create_catalog_service(&context);
        let _ = svc.add_book(&BookFields::new("0306406152", "Dune", "Herbert_Frank", "Chilton", "1965", "science fiction"))
            .await.expect("should add book");

        let cmd = GetBookCommand::new(create_catalog_service(&context));
        let res = cmd.execute(GetBookCommandRequest::new("0-306-40615-2")).await.expect("should get book");
        assert_eq!("Dune", res.book.title.as_str());

        let err = cmd.execute(GetBookCommandRequest::new("080442957X")).await.unwrap_err();
        assert!(matches!(err, CommandError::NotFound{ .. }));
    }
}
