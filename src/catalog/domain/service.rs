use std::collections::HashMap;
use async_trait::async_trait;
use tracing::info;
use crate::books::dto::BookDto;
use crate::books::validator::{validate_for_create, BookFields};
use crate::catalog::domain::{CatalogContext, CatalogService};
use crate::catalog::domain::stats::CatalogStats;
use crate::core::library::{LibraryError, LibraryResult};

pub(crate) struct CatalogServiceImpl {
    context: CatalogContext,
}

impl CatalogServiceImpl {
    pub(crate) fn new(context: &CatalogContext) -> Self {
        Self {
            context: context.clone(),
        }
    }
}

fn not_found(isbn: &str) -> LibraryError {
    LibraryError::not_found(format!("book not found for {}", isbn).as_str())
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, fields: &BookFields) -> LibraryResult<BookDto> {
        let book = validate_for_create(fields)?;
        let dto = BookDto::from(&book);
        let mut store = self.context.store.lock().await;
        store.create(book)?;
        self.context.persist_if_enabled(&store).await?;
        info!("added book {}", dto.isbn);
        Ok(dto)
    }

    async fn remove_book(&self, isbn: &str) -> LibraryResult<BookDto> {
        let mut store = self.context.store.lock().await;
        let removed = store.delete(isbn)?;
        self.context.persist_if_enabled(&store).await?;
        info!("removed book {}", removed.isbn());
        Ok(BookDto::from(&removed))
    }

    async fn update_book(&self, isbn: &str, updates: &HashMap<String, String>) -> LibraryResult<BookDto> {
        let mut store = self.context.store.lock().await;
        let applied = store.update(isbn, updates)?;
        if applied > 0 {
            self.context.persist_if_enabled(&store).await?;
        }
        info!("updated {} of {} fields of book {}", applied, updates.len(), isbn);
        store.get(isbn).map(BookDto::from).ok_or_else(|| not_found(isbn))
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto> {
        let store = self.context.store.lock().await;
        store.get(isbn).map(BookDto::from).ok_or_else(|| not_found(isbn))
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookDto>> {
        let store = self.context.store.lock().await;
        Ok(store.all().iter().map(BookDto::from).collect())
    }

    async fn search_books(&self, field: &str, value: &str) -> LibraryResult<Vec<BookDto>> {
        let store = self.context.store.lock().await;
        Ok(store.search(field, value).into_iter().map(BookDto::from).collect())
    }

    async fn filter_books(&self, criteria: &HashMap<String, String>) -> LibraryResult<Vec<BookDto>> {
        let store = self.context.store.lock().await;
        Ok(store.filter(criteria).into_iter().map(BookDto::from).collect())
    }

    async fn sort_books(&self, field: &str, ascending: bool) -> LibraryResult<()> {
        let mut store = self.context.store.lock().await;
        store.sort(field, ascending)?;
        self.context.persist_if_enabled(&store).await
    }

    async fn stats(&self) -> LibraryResult<CatalogStats> {
        let store = self.context.store.lock().await;
        Ok(store.stats(self.context.config.top_borrowers))
    }

    async fn save(&self) -> LibraryResult<usize> {
        let store = self.context.store.lock().await;
        self.context.save_snapshot(&store).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use crate::books::validator::BookFields;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory::{create_catalog_service, open_catalog_with};
    use crate::catalog::repository::in_memory_repository::InMemoryCatalogRepository;
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;

    fn dune() -> BookFields {
        BookFields::new("0306406152", "Dune", "Herbert_Frank", "Chilton", "1965", "science fiction")
    }

    async fn build_service(config: &Configuration, repo: Arc<InMemoryCatalogRepository>) -> Box<dyn CatalogService> {
        let context = open_catalog_with(config, repo).expect("should open catalog");
        create_catalog_service(&context)
    }

    #[tokio::test]
    async fn test_should_add_book() {
        let svc = build_service(&Configuration::default(), Arc::new(InMemoryCatalogRepository::new())).await;
        let book = svc.add_book(&dune()).await.expect("should add book");
        let loaded = svc.find_book_by_isbn(book.isbn.as_str()).await.expect("should return book");
        assert_eq!(book, loaded);

        let err = svc.add_book(&dune()).await.unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateKey{ .. }));
        assert_eq!(1, svc.find_all().await.unwrap().len());
    }

    #[tokio::test]
    async fn test_should_update_book() {
        let svc = build_service(&Configuration::default(), Arc::new(InMemoryCatalogRepository::new())).await;
        let _ = svc.add_book(&dune()).await.expect("should add book");
        let updates = HashMap::from([
            ("title".to_string(), "Dune Messiah".to_string()),
            ("year".to_string(), "3000".to_string()),
        ]);
        let updated = svc.update_book("0306406152", &updates).await.expect("should update book");
        assert_eq!("Dune Messiah", updated.title.as_str());
        assert_eq!(1965, updated.publication_year);
    }

    #[tokio::test]
    async fn test_should_return_detached_copies() {
        let svc = build_service(&Configuration::default(), Arc::new(InMemoryCatalogRepository::new())).await;
        let mut book = svc.add_book(&dune()).await.expect("should add book");
        book.title = "changed".to_string();
        let loaded = svc.find_book_by_isbn("0306406152").await.unwrap();
        assert_eq!("Dune", loaded.title.as_str());
    }

    #[tokio::test]
    async fn test_should_remove_book() {
        let svc = build_service(&Configuration::default(), Arc::new(InMemoryCatalogRepository::new())).await;
        let _ = svc.add_book(&dune()).await.expect("should add book");
        let _ = svc.remove_book("0306406152").await.expect("should remove book");
        let loaded = svc.find_book_by_isbn("0306406152").await;
        assert!(loaded.is_err());
    }

    #[tokio::test]
    async fn test_should_query_and_sort() {
        let svc = build_service(&Configuration::default(), Arc::new(InMemoryCatalogRepository::new())).await;
        let _ = svc.add_book(&dune()).await.unwrap();
        let _ = svc.add_book(&BookFields::new("9780306406157", "Emma", "Austen_Jane", "Penguin", "1815", "classic")).await.unwrap();
        assert_eq!(1, svc.search_books("author", "austen").await.unwrap().len());
        let filtered = svc.filter_books(&HashMap::from([("year".to_string(), "<1900".to_string())])).await.unwrap();
        assert_eq!("Emma", filtered[0].title.as_str());
        svc.sort_books("year", true).await.unwrap();
        assert_eq!("Emma", svc.find_all().await.unwrap()[0].title.as_str());
        assert!(svc.sort_books("price", true).await.is_err());
        assert_eq!(2, svc.stats().await.unwrap().total);
    }

    #[tokio::test]
    async fn test_should_save_on_demand() {
        let repo = Arc::new(InMemoryCatalogRepository::new());
        let svc = build_service(&Configuration::default(), repo.clone()).await;
        let _ = svc.add_book(&dune()).await.unwrap();
        assert!(repo.lines().unwrap().is_empty());
        assert_eq!(1, svc.save().await.unwrap());
        assert_eq!(2, repo.lines().unwrap().len());
    }

    #[tokio::test]
    async fn test_should_autosave_mutations() {
        let mut config = Configuration::default();
        config.autosave = true;
        let repo = Arc::new(InMemoryCatalogRepository::new());
        let svc = build_service(&config, repo.clone()).await;
        let _ = svc.add_book(&dune()).await.unwrap();
        assert_eq!(2, repo.lines().unwrap().len());
    }
}
