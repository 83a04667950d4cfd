//! CO2e Core -- the emission calculation engine for carbon-footprint
//! trackers.
//!
//! Maps a logged activity `(category, quantity, unit, subcategory?)` to a
//! CO2-equivalent mass using a tiered table of emission factors, with
//! deterministic fallback, key normalization, and confidence reporting.
//!
//! # Resolution pipeline
//!
//! Each call to [`engine::Engine::calculate`] runs:
//!
//! 1. **Validate** -- category/unit non-empty, quantity finite and >= 0.
//! 2. **Normalize** -- lowercase, trim, whitespace/hyphens to underscores,
//!    strip everything outside `[a-z0-9_]` ([`normalize::normalize`]).
//! 3. **Resolve** -- consult the table tiers in strict priority order:
//!    subcategory-specific, category default, generic fallback. First hit
//!    wins ([`table::FactorTable::lookup`]).
//! 4. **Compute** -- `quantity * factor`, rounded to 3 decimals,
//!    half away from zero.
//!
//! # Key Types
//!
//! - [`engine::Engine`] -- Validation, resolution, and batch orchestration.
//! - [`table::FactorTable`] -- Immutable three-tier factor data, built once
//!   via [`table::FactorTableBuilder`] and frozen.
//! - [`table::Confidence`] -- Machine-checkable match specificity
//!   (high/medium/low); the authoritative signal for callers.
//! - [`error::CalcError`] -- Client-input error taxonomy with hint data.
//!
//! The engine is purely functional over the frozen table: no locks, no
//! shared mutable state, no I/O. The optional `parallel` feature adds a
//! rayon-powered batch entry point.

pub mod engine;
pub mod error;
pub mod normalize;
pub mod table;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use engine::{Activity, BatchSummary, CalculationResult, Engine, FactorInfo};
pub use error::CalcError;
pub use table::{Confidence, FactorMatch, FactorTable, FactorTableBuilder, TableBuildError, Tier};
