use crate::catalog::domain::CatalogContext;
use crate::checkout::domain::CheckoutService;
use crate::checkout::domain::service::CheckoutServiceImpl;

pub fn create_checkout_service(context: &CatalogContext) -> Box<dyn CheckoutService> {
    Box::new(CheckoutServiceImpl::new(context))
}
