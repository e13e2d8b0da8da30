use std::sync::Arc;

use catalog::ProductRepository;
use shared::{
    domain::Product,
    error::{ApiError, ErrorCode},
    protocol::{FETCH_FAILED_MESSAGE, PRODUCT_NOT_FOUND_MESSAGE},
};
use tracing::{debug, error};

#[derive(Clone)]
pub struct ApiContext {
    pub catalog: Arc<dyn ProductRepository>,
}

impl ApiContext {
    pub fn new(catalog: Arc<dyn ProductRepository>) -> Self {
        Self { catalog }
    }
}

pub async fn lookup_product(ctx: &ApiContext, handle: &str) -> Result<Product, ApiError> {
    let product = ctx.catalog.find_by_handle(handle).await.map_err(|err| {
        error!(%handle, error = %format!("{err:#}"), "product lookup failed");
        ApiError::new(ErrorCode::Internal, FETCH_FAILED_MESSAGE)
    })?;

    match product {
        Some(product) => {
            debug!(%handle, properties = product.properties.len(), "product found");
            Ok(product)
        }
        None => Err(ApiError::new(ErrorCode::NotFound, PRODUCT_NOT_FOUND_MESSAGE)),
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
