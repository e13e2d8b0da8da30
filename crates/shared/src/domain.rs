use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyEntry {
    pub name: String,
    pub value: String,
}

impl PropertyEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub handle: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Vec<PropertyEntry>,
}

// `"properties": null` reads the same as an absent list.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<PropertyEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<PropertyEntry>>::deserialize(deserializer)?.unwrap_or_default())
}

const FURNITURE_DEFAULTS: &[(&str, &str)] =
    &[("Material", "Wood"), ("Dimensions", "200cm x 300cm")];
const ELECTRONICS_DEFAULTS: &[(&str, &str)] = &[("Power", "70W"), ("Voltage", "220V")];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    Furniture,
    Electronics,
    Custom,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Furniture,
        ProductType::Electronics,
        ProductType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Furniture => "furniture",
            ProductType::Electronics => "electronics",
            ProductType::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Furniture => "Furniture",
            ProductType::Electronics => "Electronics",
            ProductType::Custom => "Custom Product",
        }
    }

    /// Returns a freshly allocated copy of the preset's default properties.
    pub fn default_properties(&self) -> Vec<PropertyEntry> {
        let table: &[(&str, &str)] = match self {
            ProductType::Furniture => FURNITURE_DEFAULTS,
            ProductType::Electronics => ELECTRONICS_DEFAULTS,
            ProductType::Custom => &[],
        };
        table
            .iter()
            .map(|(name, value)| PropertyEntry::new(*name, *value))
            .collect()
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown product type '{0}' (expected furniture, electronics or custom)")]
pub struct UnknownProductType(pub String);

impl FromStr for ProductType {
    type Err = UnknownProductType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ProductType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownProductType(s.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
