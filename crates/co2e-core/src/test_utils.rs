//! Small fixture tables for tests, proptests, and benchmarks.
//!
//! Enabled via the `test-utils` feature. The sample table is deliberately
//! tiny but exercises every tier: overlapping units between subcategory,
//! default, and generic tiers; a zero factor; and a negative credit factor.

use crate::engine::Engine;
use crate::table::{FactorTable, FactorTableBuilder};

/// A three-category table covering all lookup tiers.
///
/// - `electricity`: defaults (kwh 0.475, mwh 475) + subcategories `coal`
///   (kwh 0.95) and `wind` (kwh 0.011) + generic (kwh 0.5). The kwh overlap
///   between tiers makes tier-priority regressions visible.
/// - `travel`: subcategories only (`car`, `car_electric`, `walk`, `plane`)
///   plus generic (km 0.192). `walk` is the zero factor.
/// - `waste`: defaults (kg 0.5) + `paper_recycled` (kg -1.7), the credit.
pub fn sample_table() -> FactorTable {
    let mut b = FactorTableBuilder::new();
    b.defaults("electricity", &[("kwh", 0.475), ("mwh", 475.0)])
        .subcategory("electricity", "coal", &[("kwh", 0.95)])
        .subcategory("electricity", "wind", &[("kwh", 0.011)])
        .generic("electricity", &[("kwh", 0.5)]);
    b.subcategory("travel", "car", &[("km", 0.192), ("mile", 0.309)])
        .subcategory("travel", "car_electric", &[("km", 0.053)])
        .subcategory("travel", "walk", &[("km", 0.0)])
        .subcategory("travel", "plane", &[("km", 0.255), ("hours", 90.0)])
        .generic("travel", &[("km", 0.192)]);
    b.defaults("waste", &[("kg", 0.5)])
        .subcategory("waste", "paper_recycled", &[("kg", -1.7)]);
    b.build().expect("sample table is valid")
}

/// An engine over [`sample_table`].
pub fn sample_engine() -> Engine {
    Engine::new(sample_table())
}
