use super::*;
use async_trait::async_trait;
use form_core::FetchError;
use shared::domain::{Product, ProductType, PropertyEntry};

struct CatalogStub;

#[async_trait]
impl ProductLookup for CatalogStub {
    async fn lookup(&self, handle: &str) -> Result<Product, FetchError> {
        if handle == "sample-product-1" {
            Ok(Product {
                handle: handle.to_string(),
                properties: vec![
                    PropertyEntry::new("Color", "red"),
                    PropertyEntry::new("Size", "large"),
                ],
            })
        } else {
            Err(FetchError::Rejected {
                status: 404,
                message: Some("Product not found.".to_string()),
            })
        }
    }
}

#[tokio::test]
async fn fetch_with_handle_loads_properties() {
    let mut form = ProductForm::default();
    let step = apply(
        &mut form,
        &CatalogStub,
        EditorCommand::Fetch {
            handle: Some("sample-product-1".to_string()),
        },
    )
    .await;
    assert_eq!(
        step,
        Step::Continue {
            status: Some("loaded 2 properties for 'sample-product-1'".to_string()),
        }
    );
    assert_eq!(form.handle(), "sample-product-1");
    assert_eq!(form.product_type(), ProductType::Custom);
}

#[tokio::test]
async fn failed_fetch_leaves_banner_on_form() {
    let mut form = ProductForm::default();
    apply(&mut form, &CatalogStub, EditorCommand::SetHandle {
        handle: "nope".to_string(),
    })
    .await;
    let step = apply(&mut form, &CatalogStub, EditorCommand::Fetch { handle: None }).await;
    assert_eq!(step, Step::Continue { status: None });
    assert_eq!(form.error_message(), "Product not found.");
}

#[tokio::test]
async fn edit_generate_minify_flow() {
    let mut form = ProductForm::new(ProductType::Custom);
    for command in [
        EditorCommand::Add,
        EditorCommand::SetName {
            index: 0,
            name: "A".to_string(),
        },
        EditorCommand::SetValue {
            index: 0,
            value: "1".to_string(),
        },
        EditorCommand::Generate,
        EditorCommand::Minify,
    ] {
        apply(&mut form, &CatalogStub, command).await;
    }
    assert_eq!(form.output(), r#"{"A":"1"}"#);
}

#[tokio::test]
async fn errors_become_status_lines() {
    let mut form = ProductForm::new(ProductType::Custom);
    let step = apply(&mut form, &CatalogStub, EditorCommand::Minify).await;
    assert_eq!(
        step,
        Step::Continue {
            status: Some("there is no generated output to minify".to_string()),
        }
    );

    let step = apply(&mut form, &CatalogStub, EditorCommand::Remove { index: 4 }).await;
    assert_eq!(
        step,
        Step::Continue {
            status: Some("property index 4 is out of range for 0 properties".to_string()),
        }
    );

    form.add_property();
    let step = apply(&mut form, &CatalogStub, EditorCommand::Generate).await;
    assert_eq!(
        step,
        Step::Continue {
            status: Some("1 properties have an empty name or value (marked !)".to_string()),
        }
    );
}

#[tokio::test]
async fn quit_stops_the_loop() {
    let mut form = ProductForm::default();
    assert_eq!(
        apply(&mut form, &CatalogStub, EditorCommand::Quit).await,
        Step::Quit
    );
}
