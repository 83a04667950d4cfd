//! The calculation engine: the sole public entry point for converting a
//! logged activity into a CO2-equivalent mass.
//!
//! The `Engine` owns a frozen [`FactorTable`] and layers on top of it:
//! input validation, key normalization, tiered factor resolution, the
//! multiply-and-round step, and error classification. Every operation is a
//! pure function over the table and its inputs -- no locks, no I/O, no
//! state -- so concurrent callers share `&Engine` freely.
//!
//! # Rounding
//!
//! All CO2e outputs are rounded to exactly 3 decimal places using
//! round-half-away-from-zero (`f64::round` semantics). Downstream reports
//! sum these values, so the batch total is the sum of the already-rounded
//! per-item values, itself rounded once more at the end.

use crate::error::CalcError;
use crate::normalize::normalize;
use crate::table::{Confidence, FactorTable, Tier};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Round to 3 decimal places, half away from zero.
fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// The outcome of a single successful calculation.
///
/// Transient: created fresh per call and owned by the caller, who is
/// responsible for persisting or displaying it. String fields echo the
/// *normalized* inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    /// CO2-equivalent mass in kg, rounded to 3 decimals. Negative values
    /// are emission credits (the matched factor was negative).
    pub co2e_kg: f64,
    pub category: String,
    pub subcategory: Option<String>,
    pub quantity: f64,
    pub unit: String,
    /// The emission factor actually used (kg CO2e per unit).
    pub factor: f64,
    /// Which lookup tier supplied the factor.
    pub tier: Tier,
    /// Debug-only provenance label, e.g. `"travel.car_electric.km"`.
    /// Branch on `confidence`, never parse this.
    pub provenance: String,
    pub confidence: Confidence,
}

/// Factor resolution metadata without a quantity. Backs UI endpoints that
/// show which factor a combination would use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorInfo {
    pub factor: f64,
    pub tier: Tier,
    pub provenance: String,
    pub confidence: Confidence,
}

/// One activity in a batch request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub subcategory: Option<String>,
}

/// Outcome of a batch calculation. Failed activities are counted and
/// logged, never propagated; `results` keeps the input order of the
/// successful activities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub results: Vec<CalculationResult>,
    /// Sum of all successful results' `co2e_kg`, rounded to 3 decimals.
    pub total_co2e_kg: f64,
    pub success_count: usize,
    pub failure_count: usize,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The emission calculation engine. Loaded once at process start with an
/// immutable factor table; read-only for the lifetime of the process.
#[derive(Debug)]
pub struct Engine {
    table: FactorTable,
}

impl Engine {
    pub fn new(table: FactorTable) -> Self {
        Self { table }
    }

    /// The underlying factor table (for enumeration endpoints).
    pub fn table(&self) -> &FactorTable {
        &self.table
    }

    /// Convert an activity into kg CO2e.
    ///
    /// Validates inputs, normalizes all strings, resolves the
    /// best-available factor through the table tiers, then computes
    /// `quantity * factor` rounded to 3 decimals.
    ///
    /// `quantity` must be finite and non-negative; zero is permitted.
    /// Credits are modeled as negative factors in the table, never as
    /// negative quantities.
    pub fn calculate(
        &self,
        category: &str,
        quantity: f64,
        unit: &str,
        subcategory: Option<&str>,
    ) -> Result<CalculationResult, CalcError> {
        if category.trim().is_empty() {
            return Err(CalcError::InvalidCategory);
        }
        if !quantity.is_finite() {
            return Err(CalcError::InvalidQuantity { provided: quantity });
        }
        if quantity < 0.0 {
            return Err(CalcError::NegativeQuantity { provided: quantity });
        }
        if unit.trim().is_empty() {
            return Err(CalcError::InvalidUnit);
        }

        let (cat, sub, unit_key, matched) = self.resolve(category, unit, subcategory)?;

        let provenance = matched.tier.provenance(&cat, sub.as_deref(), &unit_key);
        Ok(CalculationResult {
            co2e_kg: round3(quantity * matched.factor),
            category: cat,
            subcategory: sub,
            quantity,
            unit: unit_key,
            factor: matched.factor,
            tier: matched.tier,
            provenance,
            confidence: matched.tier.confidence(),
        })
    }

    /// Best-effort variant: identical resolution, but yields `0.0` instead
    /// of propagating any error. Intended for aggregate contexts that
    /// tolerate a missing data point more than a hard failure.
    ///
    /// Suppressed errors are recorded via `tracing::warn!` so degraded
    /// results stay diagnosable.
    pub fn calculate_safe(
        &self,
        category: &str,
        quantity: f64,
        unit: &str,
        subcategory: Option<&str>,
    ) -> f64 {
        match self.calculate(category, quantity, unit, subcategory) {
            Ok(result) => result.co2e_kg,
            Err(err) => {
                tracing::warn!(
                    category,
                    unit,
                    subcategory = subcategory.unwrap_or(""),
                    error = %err,
                    "emission calculation failed; substituting 0"
                );
                0.0
            }
        }
    }

    /// Whether resolution would succeed for this combination. Never errors.
    pub fn is_valid_combination(
        &self,
        category: &str,
        unit: &str,
        subcategory: Option<&str>,
    ) -> bool {
        self.factor_info(category, unit, subcategory).is_ok()
    }

    /// Run resolution without computing a result: which factor would this
    /// combination use, from which tier, at what confidence.
    pub fn factor_info(
        &self,
        category: &str,
        unit: &str,
        subcategory: Option<&str>,
    ) -> Result<FactorInfo, CalcError> {
        if category.trim().is_empty() {
            return Err(CalcError::InvalidCategory);
        }
        if unit.trim().is_empty() {
            return Err(CalcError::InvalidUnit);
        }

        let (cat, sub, unit_key, matched) = self.resolve(category, unit, subcategory)?;
        Ok(FactorInfo {
            factor: matched.factor,
            tier: matched.tier,
            provenance: matched.tier.provenance(&cat, sub.as_deref(), &unit_key),
            confidence: matched.tier.confidence(),
        })
    }

    /// Process each activity independently: one failure neither aborts the
    /// batch nor corrupts the aggregate, but shows up in `failure_count`.
    pub fn batch_calculate(&self, activities: &[Activity]) -> BatchSummary {
        let outcomes: Vec<Result<CalculationResult, CalcError>> = activities
            .iter()
            .map(|a| self.calculate(&a.category, a.quantity, &a.unit, a.subcategory.as_deref()))
            .collect();
        self.summarize(activities, outcomes)
    }

    /// Like [`batch_calculate`], computed across the rayon thread pool.
    /// Activities are independent, so this is a join, not a race: output is
    /// identical to the sequential version, input order included.
    ///
    /// [`batch_calculate`]: Engine::batch_calculate
    #[cfg(feature = "parallel")]
    pub fn batch_calculate_parallel(&self, activities: &[Activity]) -> BatchSummary {
        let outcomes: Vec<Result<CalculationResult, CalcError>> = activities
            .par_iter()
            .map(|a| self.calculate(&a.category, a.quantity, &a.unit, a.subcategory.as_deref()))
            .collect();
        self.summarize(activities, outcomes)
    }

    fn summarize(
        &self,
        activities: &[Activity],
        outcomes: Vec<Result<CalculationResult, CalcError>>,
    ) -> BatchSummary {
        let mut results = Vec::with_capacity(outcomes.len());
        let mut total = 0.0;
        let mut failure_count = 0;

        for (activity, outcome) in activities.iter().zip(outcomes) {
            match outcome {
                Ok(result) => {
                    total += result.co2e_kg;
                    results.push(result);
                }
                Err(err) => {
                    tracing::warn!(
                        category = %activity.category,
                        unit = %activity.unit,
                        subcategory = activity.subcategory.as_deref().unwrap_or(""),
                        error = %err,
                        "batch activity failed; excluded from results"
                    );
                    failure_count += 1;
                }
            }
        }

        BatchSummary {
            total_co2e_kg: round3(total),
            success_count: results.len(),
            failure_count,
            results,
        }
    }

    /// Normalize all string inputs and resolve through the table tiers.
    ///
    /// Returns the normalized keys alongside the match so callers can build
    /// provenance labels. Classification: missing category entry is
    /// `UnknownCategory` (with the known-category hint); a category that
    /// exists but yields no tier hit is `FactorNotFound` (with the
    /// valid-units hint).
    fn resolve(
        &self,
        category: &str,
        unit: &str,
        subcategory: Option<&str>,
    ) -> Result<(String, Option<String>, String, crate::table::FactorMatch), CalcError> {
        let cat = normalize(category);
        let unit_key = normalize(unit);
        let sub = subcategory.map(normalize).filter(|s| !s.is_empty());

        if !self.table.contains_category(&cat) {
            return Err(CalcError::UnknownCategory {
                category: category.trim().to_string(),
                known: self.table.list_categories().to_vec(),
            });
        }

        match self.table.lookup(&cat, sub.as_deref(), &unit_key) {
            Some(matched) => Ok((cat, sub, unit_key, matched)),
            None => Err(CalcError::FactorNotFound {
                category: category.trim().to_string(),
                subcategory: subcategory.map(|s| s.trim().to_string()),
                unit: unit.trim().to_string(),
                valid_units: self.table.valid_units(&cat, sub.as_deref()),
            }),
        }
    }
}
