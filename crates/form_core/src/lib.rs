//! State controller for the product properties editor.
//!
//! [`ProductForm`] owns the editable property list, the per-entry validation
//! flags and the generated JSON output. Output and flags are snapshots: they
//! are only recomputed by [`ProductForm::generate_output`], never by edits.

use serde_json::{Map, Value};
use shared::{
    domain::{Product, ProductType, PropertyEntry},
    protocol::FETCH_FAILED_MESSAGE,
};
use tracing::debug;

pub mod error;
pub mod lookup;

pub use error::{FetchError, FormError};
pub use lookup::{HttpProductLookup, ProductLookup};

/// Validation flags for one property, set by the last generate attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropertyError {
    pub name_empty: bool,
    pub value_empty: bool,
}

impl PropertyError {
    fn check(entry: &PropertyEntry) -> Self {
        Self {
            name_empty: entry.name.trim().is_empty(),
            value_empty: entry.value.trim().is_empty(),
        }
    }

    pub fn any(&self) -> bool {
        self.name_empty || self.value_empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    Generated,
    /// Output left untouched; `flagged` entries have an empty field.
    Invalid { flagged: usize },
}

/// Issued by [`ProductForm::begin_fetch`]; only the most recent ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchApplied {
    Loaded,
    Failed,
    /// A newer fetch was started; the result was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ProductForm {
    product_type: ProductType,
    properties: Vec<PropertyEntry>,
    errors: Vec<PropertyError>,
    output: String,
    handle: String,
    error_message: String,
    fetch_generation: u64,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new(ProductType::default())
    }
}

impl ProductForm {
    pub fn new(product_type: ProductType) -> Self {
        let properties = product_type.default_properties();
        let errors = vec![PropertyError::default(); properties.len()];
        Self {
            product_type,
            properties,
            errors,
            output: String::new(),
            handle: String::new(),
            error_message: String::new(),
            fetch_generation: 0,
        }
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn properties(&self) -> &[PropertyEntry] {
        &self.properties
    }

    pub fn errors(&self) -> &[PropertyError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(PropertyError::any)
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Fetch failure banner text; empty when there is nothing to show.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn set_handle(&mut self, handle: impl Into<String>) {
        self.handle = handle.into();
    }

    pub fn select_product_type(&mut self, product_type: ProductType) {
        debug!(%product_type, "selecting product type preset");
        self.product_type = product_type;
        self.replace_properties(product_type.default_properties());
    }

    pub fn set_property_name(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), FormError> {
        self.entry_mut(index)?.name = name.into();
        Ok(())
    }

    pub fn set_property_value(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.entry_mut(index)?.value = value.into();
        Ok(())
    }

    pub fn add_property(&mut self) {
        self.properties.push(PropertyEntry::default());
        self.errors.push(PropertyError::default());
    }

    pub fn remove_property(&mut self, index: usize) -> Result<PropertyEntry, FormError> {
        let len = self.properties.len();
        if index >= len {
            return Err(FormError::IndexOutOfRange { index, len });
        }
        let removed = self.properties.remove(index);
        self.errors.remove(index);
        Ok(removed)
    }

    pub fn generate_output(&mut self) -> GenerateOutcome {
        self.errors = self.properties.iter().map(PropertyError::check).collect();

        let flagged = self.errors.iter().filter(|flags| flags.any()).count();
        if flagged > 0 {
            debug!(flagged, "generate blocked by empty fields");
            return GenerateOutcome::Invalid { flagged };
        }

        let mut document = Map::new();
        for entry in &self.properties {
            if entry.name.trim().is_empty() || entry.value.trim().is_empty() {
                continue;
            }
            // repeated names keep their first position and take the last value
            document.insert(entry.name.clone(), Value::String(entry.value.clone()));
        }

        self.output = format!("{:#}", Value::Object(document));
        debug!(bytes = self.output.len(), "generated output");
        GenerateOutcome::Generated
    }

    pub fn minify_output(&mut self) -> Result<(), FormError> {
        if self.output.trim().is_empty() {
            return Err(FormError::NothingToMinify);
        }
        let document: Value =
            serde_json::from_str(&self.output).map_err(FormError::InvalidOutput)?;
        self.output = document.to_string();
        Ok(())
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        FetchTicket {
            generation: self.fetch_generation,
        }
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Product, FetchError>,
    ) -> FetchApplied {
        if ticket.generation != self.fetch_generation {
            debug!(
                ticket = ticket.generation,
                latest = self.fetch_generation,
                "dropping stale fetch result"
            );
            return FetchApplied::Stale;
        }

        match result {
            Ok(product) => {
                debug!(handle = %product.handle, properties = product.properties.len(), "loaded product");
                self.error_message.clear();
                self.product_type = ProductType::Custom;
                self.replace_properties(product.properties);
                FetchApplied::Loaded
            }
            Err(err) => {
                debug!(error = %err, "fetch failed");
                self.error_message = err
                    .server_message()
                    .unwrap_or(FETCH_FAILED_MESSAGE)
                    .to_string();
                FetchApplied::Failed
            }
        }
    }

    pub async fn fetch_product(
        &mut self,
        lookup: &dyn ProductLookup,
        handle: &str,
    ) -> FetchApplied {
        let ticket = self.begin_fetch();
        let result = lookup.lookup(handle).await;
        self.complete_fetch(ticket, result)
    }

    /// Fetches using the handle input field.
    pub async fn fetch_current(&mut self, lookup: &dyn ProductLookup) -> FetchApplied {
        let handle = self.handle.clone();
        self.fetch_product(lookup, &handle).await
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut PropertyEntry, FormError> {
        let len = self.properties.len();
        self.properties
            .get_mut(index)
            .ok_or(FormError::IndexOutOfRange { index, len })
    }

    // Flags stay stale by index; only the length follows the new list.
    fn replace_properties(&mut self, properties: Vec<PropertyEntry>) {
        self.properties = properties;
        self.errors
            .resize(self.properties.len(), PropertyError::default());
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
