use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use tracing::info;
use crate::books::domain::Book;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogContext;
use crate::checkout::domain::CheckoutService;
use crate::core::library::LibraryResult;
use crate::utils::date::{format_date, today};

pub(crate) struct CheckoutServiceImpl {
    context: CatalogContext,
}

impl CheckoutServiceImpl {
    pub(crate) fn new(context: &CatalogContext) -> Self {
        Self {
            context: context.clone(),
        }
    }

    fn default_due_date(&self, borrow_date: NaiveDate) -> Option<NaiveDate> {
        if self.context.config.book_loan_days > 0 {
            borrow_date.checked_add_signed(Duration::days(self.context.config.book_loan_days))
        } else {
            None
        }
    }
}

#[async_trait]
impl CheckoutService for CheckoutServiceImpl {
    async fn checkout(&self, isbn: &str, borrower: &str, due_date: Option<NaiveDate>) -> LibraryResult<BookDto> {
        let borrow_date = today();
        let due_date = due_date.or_else(|| self.default_due_date(borrow_date));
        let mut store = self.context.store.lock().await;
        let book = BookDto::from(store.borrow_on(isbn, borrower, borrow_date, due_date)?);
        self.context.persist_if_enabled(&store).await?;
        info!("book {} checked out by {} due {}", book.isbn, borrower,
              due_date.map(|d| format_date(&d)).unwrap_or_else(|| "N/A".to_string()));
        Ok(book)
    }

    async fn returned(&self, isbn: &str) -> LibraryResult<BookDto> {
        let mut store = self.context.store.lock().await;
        let book = BookDto::from(store.return_book(isbn)?);
        self.context.persist_if_enabled(&store).await?;
        info!("book {} returned", book.isbn);
        Ok(book)
    }

    async fn query_overdue(&self) -> LibraryResult<Vec<BookDto>> {
        let now = today();
        let store = self.context.store.lock().await;
        Ok(store.all().iter().filter(|b| b.is_overdue(now)).map(BookDto::from).collect())
    }
}
