//! The emission factor table: immutable, three-tier lookup data.
//!
//! Built once at process start via [`FactorTableBuilder`], then frozen.
//! `&FactorTable` is freely shareable across threads; there is no mutation
//! API and no interior mutability.
//!
//! Lookup consults three tiers in strict priority order:
//!
//! 1. subcategory-specific factors (most specific match)
//! 2. category defaults (the `"default"` pseudo-subcategory)
//! 3. generic category fallback
//!
//! The first tier holding the exact normalized unit wins, even if a later
//! tier also matches. This ordering is part of the contract -- changing it
//! changes historical calculation outputs -- so it is test-locked below.

use crate::normalize::is_normalized;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

// ---------------------------------------------------------------------------
// Tiers and confidence
// ---------------------------------------------------------------------------

/// How specific the matched factor was to the requested activity.
///
/// Derived purely from which tier satisfied the lookup. This is the
/// machine-checkable signal callers should branch on; the provenance string
/// is debug metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// A subcategory-specific factor matched.
    High,
    /// A category default or generic fallback matched.
    Medium,
    /// Reserved for future heuristic matches; never produced today.
    Low,
}

/// The lookup tier that supplied a factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Subcategory,
    CategoryDefault,
    Generic,
}

impl Tier {
    /// Confidence rating implied by this tier.
    pub fn confidence(self) -> Confidence {
        match self {
            Tier::Subcategory => Confidence::High,
            Tier::CategoryDefault | Tier::Generic => Confidence::Medium,
        }
    }

    /// Human-readable provenance label for audit and debugging.
    ///
    /// Advisory only: callers must branch on [`Confidence`], never parse this.
    pub fn provenance(self, category: &str, subcategory: Option<&str>, unit: &str) -> String {
        match self {
            Tier::Subcategory => {
                let sub = subcategory.unwrap_or("?");
                format!("{category}.{sub}.{unit}")
            }
            Tier::CategoryDefault => format!("{category}.default.{unit}"),
            Tier::Generic => format!("{category}.{unit} (generic)"),
        }
    }
}

/// A successful factor lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorMatch {
    /// kg CO2e per unit of activity. May be zero (walking) or negative
    /// (recycling credit: avoided emissions).
    pub factor: f64,
    pub tier: Tier,
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

type UnitFactors = HashMap<String, f64>;

/// Per-category factor data across the three tiers.
#[derive(Debug, Default)]
struct CategoryEntry {
    subcategories: HashMap<String, UnitFactors>,
    subcategory_order: Vec<String>,
    defaults: UnitFactors,
    generic: UnitFactors,
}

impl CategoryEntry {
    fn is_empty(&self) -> bool {
        self.subcategories.values().all(|u| u.is_empty())
            && self.defaults.is_empty()
            && self.generic.is_empty()
    }
}

/// Immutable emission factor table. Frozen after
/// [`FactorTableBuilder::build`]; thread-safe to share.
///
/// All keys are stored pre-normalized (see [`crate::normalize`]); callers
/// must normalize before lookup. The engine does this for every input.
#[derive(Debug)]
pub struct FactorTable {
    categories: HashMap<String, CategoryEntry>,
    category_order: Vec<String>,
}

impl FactorTable {
    /// All category names, in registration order.
    pub fn list_categories(&self) -> &[String] {
        &self.category_order
    }

    /// Whether `category` exists in any tier.
    pub fn contains_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Subcategory names for a category, sorted. Excludes the `"default"`
    /// pseudo-subcategory. Unknown categories yield an empty list rather
    /// than an error.
    pub fn list_subcategories(&self, category: &str) -> Vec<String> {
        match self.categories.get(category) {
            Some(entry) => {
                let mut names = entry.subcategory_order.clone();
                names.sort_unstable();
                names
            }
            None => Vec::new(),
        }
    }

    /// Resolve a factor for `(category, subcategory?, unit)` through the
    /// tiers in strict priority order. Pure and deterministic.
    ///
    /// A supplied-but-unknown subcategory is not an error here: resolution
    /// falls through to the category tiers, exactly as when no subcategory
    /// was given.
    pub fn lookup(
        &self,
        category: &str,
        subcategory: Option<&str>,
        unit: &str,
    ) -> Option<FactorMatch> {
        let entry = self.categories.get(category)?;

        if let Some(sub) = subcategory {
            if let Some(units) = entry.subcategories.get(sub) {
                if let Some(&factor) = units.get(unit) {
                    return Some(FactorMatch {
                        factor,
                        tier: Tier::Subcategory,
                    });
                }
            }
        }

        if let Some(&factor) = entry.defaults.get(unit) {
            return Some(FactorMatch {
                factor,
                tier: Tier::CategoryDefault,
            });
        }

        if let Some(&factor) = entry.generic.get(unit) {
            return Some(FactorMatch {
                factor,
                tier: Tier::Generic,
            });
        }

        None
    }

    /// Units that could resolve for this category/subcategory, sorted.
    ///
    /// With a known subcategory supplied: that subcategory's units plus the
    /// category's defaults and generic fallback. Without one (or with an
    /// unknown one): the union across all subcategories plus defaults and
    /// generic. Used as hint data in `FactorNotFound` errors and for UI
    /// metadata endpoints.
    pub fn valid_units(&self, category: &str, subcategory: Option<&str>) -> Vec<String> {
        let Some(entry) = self.categories.get(category) else {
            return Vec::new();
        };

        let mut units: BTreeSet<&str> = BTreeSet::new();

        match subcategory.and_then(|s| entry.subcategories.get(s)) {
            Some(sub_units) => {
                units.extend(sub_units.keys().map(String::as_str));
            }
            None => {
                for sub_units in entry.subcategories.values() {
                    units.extend(sub_units.keys().map(String::as_str));
                }
            }
        }
        units.extend(entry.defaults.keys().map(String::as_str));
        units.extend(entry.generic.keys().map(String::as_str));

        units.into_iter().map(str::to_string).collect()
    }

    /// Total number of categories.
    pub fn category_count(&self) -> usize {
        self.category_order.len()
    }

    /// Total number of `(category, subcategory|default|generic, unit)`
    /// factor triples.
    pub fn factor_count(&self) -> usize {
        self.categories
            .values()
            .map(|e| {
                e.subcategories.values().map(HashMap::len).sum::<usize>()
                    + e.defaults.len()
                    + e.generic.len()
            })
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Errors detected when finalizing a [`FactorTableBuilder`].
#[derive(Debug, thiserror::Error)]
pub enum TableBuildError {
    /// A category, subcategory, or unit key is not in normalized form.
    #[error("key '{key}' is not in normalized form")]
    UnnormalizedKey { key: String },

    /// `"default"` is the pseudo-subcategory for category defaults and
    /// cannot be registered as a real subcategory.
    #[error("category '{category}' registers reserved subcategory 'default'")]
    ReservedSubcategory { category: String },

    /// A factor value is NaN or infinite. Zero and negative are allowed.
    #[error("non-finite factor for {entry}")]
    NonFiniteFactor { entry: String },

    /// The same `(category, subcategory|default|generic, unit)` triple was
    /// registered twice.
    #[error("duplicate factor entry {entry}")]
    DuplicateFactor { entry: String },

    /// A category ended up with no resolvable factor for any unit.
    #[error("category '{category}' has no resolvable factor for any unit")]
    EmptyCategory { category: String },
}

/// Where a registration lands within a category.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Subcategory(String),
    Defaults,
    Generic,
}

impl Slot {
    fn entry_label(&self, category: &str, unit: &str) -> String {
        match self {
            Slot::Subcategory(sub) => Tier::Subcategory.provenance(category, Some(sub), unit),
            Slot::Defaults => Tier::CategoryDefault.provenance(category, None, unit),
            Slot::Generic => Tier::Generic.provenance(category, None, unit),
        }
    }
}

/// Builder for an immutable [`FactorTable`].
///
/// Registration is infallible; all validation happens in [`build`], which
/// rejects unnormalized keys, non-finite values, duplicate triples, and
/// categories with no resolvable factor.
///
/// [`build`]: FactorTableBuilder::build
#[derive(Debug, Default)]
pub struct FactorTableBuilder {
    registrations: Vec<(String, Slot, String, f64)>,
    /// Every category named in a registration call, in first-touch order.
    /// Kept separately so a category registered with an empty factor list
    /// still exists and trips the empty-category check.
    touched: Vec<String>,
}

impl FactorTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register subcategory-specific factors (tier 1, high confidence).
    pub fn subcategory(
        &mut self,
        category: &str,
        subcategory: &str,
        factors: &[(&str, f64)],
    ) -> &mut Self {
        let slot = Slot::Subcategory(subcategory.to_string());
        self.push_all(category, slot, factors);
        self
    }

    /// Register category-default factors (tier 2, medium confidence).
    pub fn defaults(&mut self, category: &str, factors: &[(&str, f64)]) -> &mut Self {
        self.push_all(category, Slot::Defaults, factors);
        self
    }

    /// Register generic fallback factors (tier 3, medium confidence).
    pub fn generic(&mut self, category: &str, factors: &[(&str, f64)]) -> &mut Self {
        self.push_all(category, Slot::Generic, factors);
        self
    }

    fn push_all(&mut self, category: &str, slot: Slot, factors: &[(&str, f64)]) {
        if !self.touched.iter().any(|c| c == category) {
            self.touched.push(category.to_string());
        }
        for &(unit, value) in factors {
            self.registrations
                .push((category.to_string(), slot.clone(), unit.to_string(), value));
        }
    }

    /// Validate all registrations and freeze the table.
    pub fn build(self) -> Result<FactorTable, TableBuildError> {
        let mut categories: HashMap<String, CategoryEntry> = HashMap::new();
        let mut category_order: Vec<String> = Vec::new();

        for category in self.touched {
            if !is_normalized(&category) {
                return Err(TableBuildError::UnnormalizedKey { key: category });
            }
            category_order.push(category.clone());
            categories.insert(category, CategoryEntry::default());
        }

        for (category, slot, unit, value) in self.registrations {
            if !is_normalized(&unit) {
                return Err(TableBuildError::UnnormalizedKey { key: unit });
            }
            if let Slot::Subcategory(sub) = &slot {
                if sub == "default" {
                    return Err(TableBuildError::ReservedSubcategory { category });
                }
                if !is_normalized(sub) {
                    return Err(TableBuildError::UnnormalizedKey { key: sub.clone() });
                }
            }
            if !value.is_finite() {
                return Err(TableBuildError::NonFiniteFactor {
                    entry: slot.entry_label(&category, &unit),
                });
            }

            let entry = categories
                .get_mut(&category)
                .expect("touched tracks every registered category");

            let units = match &slot {
                Slot::Subcategory(sub) => {
                    if !entry.subcategories.contains_key(sub) {
                        entry.subcategory_order.push(sub.clone());
                    }
                    entry.subcategories.entry(sub.clone()).or_default()
                }
                Slot::Defaults => &mut entry.defaults,
                Slot::Generic => &mut entry.generic,
            };

            if units.insert(unit.clone(), value).is_some() {
                return Err(TableBuildError::DuplicateFactor {
                    entry: slot.entry_label(&category, &unit),
                });
            }
        }

        // Invariant: every category resolves at least one (unit, factor).
        for (name, entry) in &categories {
            if entry.is_empty() {
                return Err(TableBuildError::EmptyCategory {
                    category: name.clone(),
                });
            }
        }

        Ok(FactorTable {
            categories,
            category_order,
        })
    }
}
