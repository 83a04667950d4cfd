//! Serde data file structs for externalized emission factor definitions.
//!
//! These structs define the on-disk format for factor data files. They are
//! deserialized from RON, JSON, or TOML and then resolved into a
//! [`co2e_core::table::FactorTable`] by the loader. Keys in data files must
//! already be normalized (`[a-z0-9_]`); the table builder rejects anything
//! else so that normalization stays in the engine, not the data.

use serde::Deserialize;

/// A single unit-to-factor entry: `("kwh", 0.475)` in RON,
/// `["kwh", 0.475]` in JSON and TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FactorEntryData(pub String, pub f64);

impl FactorEntryData {
    pub fn unit(&self) -> &str {
        &self.0
    }

    pub fn value(&self) -> f64 {
        self.1
    }
}

/// A subcategory and its factor entries (lookup tier 1).
#[derive(Debug, Clone, Deserialize)]
pub struct SubcategoryData {
    pub name: String,
    pub factors: Vec<FactorEntryData>,
}

/// A category definition in a data file. `defaults` feeds tier 2 and
/// `generic` tier 3; all three sections are optional, but a category with
/// none of them fails table validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryData {
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<SubcategoryData>,
    #[serde(default)]
    pub defaults: Vec<FactorEntryData>,
    #[serde(default)]
    pub generic: Vec<FactorEntryData>,
}

/// TOML wrapper: factor files in TOML hold a top-level `[[categories]]`
/// array-of-tables rather than a bare list.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlCategories {
    pub categories: Vec<CategoryData>,
}
