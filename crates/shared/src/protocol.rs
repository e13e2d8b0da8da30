//! Endpoint paths and fixed message texts of the product lookup API.

pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Product not found.";

/// Shown for server failures and whenever a failed fetch carries no message of its own.
pub const FETCH_FAILED_MESSAGE: &str = "An error occurred while fetching the product.";

pub fn products_route() -> &'static str {
    "/api/products"
}

pub fn product_by_handle_route() -> &'static str {
    "/api/products/:handle"
}

pub fn healthz_route() -> &'static str {
    "/healthz"
}
