//! Key normalization for categories, subcategories, and units.
//!
//! This is the only place case and formatting differences are reconciled:
//! the [`FactorTable`](crate::table::FactorTable) stores pre-normalized keys,
//! and the engine normalizes every string input before any lookup. Changing
//! this grammar changes which historical inputs resolve, so it is test-locked.

/// Normalize a category, subcategory, or unit string for table lookup.
///
/// The grammar, applied in order:
/// 1. lowercase
/// 2. trim leading/trailing whitespace
/// 3. collapse each internal whitespace run to a single underscore
/// 4. map hyphens to underscores
/// 5. strip every remaining character outside `[a-z0-9_]`
///
/// The result is idempotent: normalizing an already-normalized string is a
/// no-op. `"Ton Km"`, `"ton-km"`, and `"ton_km"` all normalize to `"ton_km"`.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_whitespace = false;

    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            in_whitespace = true;
            continue;
        }
        if in_whitespace {
            out.push('_');
            in_whitespace = false;
        }
        if ch == '-' {
            out.push('_');
            continue;
        }
        for lc in ch.to_lowercase() {
            if matches!(lc, 'a'..='z' | '0'..='9' | '_') {
                out.push(lc);
            }
        }
    }

    out
}

/// Whether a string is already in normalized form (and non-empty).
///
/// Used by the table builder and data loader to reject keys that would be
/// unreachable through [`normalize`].
pub fn is_normalized(key: &str) -> bool {
    !key.is_empty() && key == normalize(key)
}
