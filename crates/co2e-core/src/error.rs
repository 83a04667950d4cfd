//! Calculation error taxonomy.
//!
//! Every variant is a client-input error (bad category/unit/quantity), never
//! an operational failure -- the engine does no I/O, so there is no
//! transient-failure or retry concept. Callers surfacing these over HTTP
//! should treat them as 4xx-class errors.
//!
//! Variants carry the offending values and, where applicable, a hint list
//! (known categories, or valid units for the attempted category/subcategory)
//! so the surrounding application can render an actionable message without
//! knowing anything about the factor data itself.

/// An emission calculation failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    /// Category missing or empty after trimming.
    #[error("category is required")]
    InvalidCategory,

    /// Quantity is NaN or infinite.
    #[error("quantity must be a finite number (got {provided})")]
    InvalidQuantity { provided: f64 },

    /// Quantity is negative. Activity amounts are always >= 0; emission
    /// credits are modeled as negative *factors*, never negative quantities.
    #[error("quantity must be non-negative (got {provided})")]
    NegativeQuantity { provided: f64 },

    /// Unit missing or empty after trimming.
    #[error("unit is required")]
    InvalidUnit,

    /// The normalized category has no entry in the factor table.
    #[error("unknown category '{category}'; known categories: {}", .known.join(", "))]
    UnknownCategory {
        category: String,
        /// All known categories, in table registration order.
        known: Vec<String>,
    },

    /// No tier produced a factor for the normalized
    /// `(category, subcategory?, unit)` triple.
    #[error(
        "no emission factor for category '{category}'{} with unit '{unit}'; valid units: {}",
        .subcategory.as_deref().map(|s| format!(" (subcategory '{s}')")).unwrap_or_default(),
        .valid_units.join(", ")
    )]
    FactorNotFound {
        category: String,
        subcategory: Option<String>,
        unit: String,
        /// Units that would have resolved for this category/subcategory.
        valid_units: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_message_lists_hints() {
        let err = CalcError::UnknownCategory {
            category: "bogus".to_string(),
            known: vec!["electricity".to_string(), "travel".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'bogus'"), "got: {msg}");
        assert!(msg.contains("electricity, travel"), "got: {msg}");
    }

    #[test]
    fn factor_not_found_message_with_subcategory() {
        let err = CalcError::FactorNotFound {
            category: "travel".to_string(),
            subcategory: Some("car".to_string()),
            unit: "lightyears".to_string(),
            valid_units: vec!["km".to_string(), "mile".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'travel'"), "got: {msg}");
        assert!(msg.contains("subcategory 'car'"), "got: {msg}");
        assert!(msg.contains("'lightyears'"), "got: {msg}");
        assert!(msg.contains("km, mile"), "got: {msg}");
    }

    #[test]
    fn factor_not_found_message_without_subcategory() {
        let err = CalcError::FactorNotFound {
            category: "water".to_string(),
            subcategory: None,
            unit: "lbs".to_string(),
            valid_units: vec!["liter".to_string()],
        };
        let msg = err.to_string();
        assert!(!msg.contains("subcategory"), "got: {msg}");
        assert!(msg.contains("valid units: liter"), "got: {msg}");
    }

    #[test]
    fn quantity_errors_echo_the_value() {
        let msg = CalcError::NegativeQuantity { provided: -4.5 }.to_string();
        assert!(msg.contains("-4.5"), "got: {msg}");
        let msg = CalcError::InvalidQuantity {
            provided: f64::NAN,
        }
        .to_string();
        assert!(msg.contains("NaN"), "got: {msg}");
    }
}
