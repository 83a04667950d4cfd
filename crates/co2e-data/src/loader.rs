//! Resolution pipeline for externalized factor data: reads data files,
//! resolves them through the core builder, yields a frozen table.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! deserialization helpers. Loading externalized data is optional -- most
//! deployments use [`crate::builtin`] -- but the semantics are identical:
//! tier ordering and normalization rules live in `co2e-core`, never here.

use crate::schema::{CategoryData, TomlCategories};
use co2e_core::table::{FactorTable, FactorTableBuilder, TableBuildError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading factor data files.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// No factor file was found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: &'static str, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The same category is defined twice in one file.
    #[error("duplicate category '{name}' in {file}")]
    DuplicateCategory { file: PathBuf, name: String },

    /// The deserialized data failed table validation (unnormalized keys,
    /// duplicate factor triples, non-finite values, empty categories).
    #[error(transparent)]
    Table(#[from] TableBuildError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection and file discovery
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

/// Base name of the factor data file the directory loader looks for.
pub const FACTORS_BASE_NAME: &str = "factors";

/// Scan a directory for `factors.ron`, `factors.toml`, or `factors.json`.
///
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// more than one format exists.
pub fn find_factor_file(dir: &Path) -> Result<Option<PathBuf>, DataLoadError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{FACTORS_BASE_NAME}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

// ===========================================================================
// Loading
// ===========================================================================

/// Load a factor table from the factor file in `dir`. Errors if no file
/// is present.
pub fn load_factor_table(dir: &Path) -> Result<FactorTable, DataLoadError> {
    let path = find_factor_file(dir)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: FACTORS_BASE_NAME,
        dir: dir.to_path_buf(),
    })?;
    load_factor_file(&path)
}

/// Load a factor table from a specific file (format detected from the
/// extension).
pub fn load_factor_file(path: &Path) -> Result<FactorTable, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    let categories: Vec<CategoryData> = match format {
        Format::Ron => ron::from_str(&content).map_err(|e| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        })?,
        Format::Json => serde_json::from_str(&content).map_err(|e| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        })?,
        Format::Toml => {
            let wrapper: TomlCategories =
                toml::from_str(&content).map_err(|e| DataLoadError::Parse {
                    file: path.to_path_buf(),
                    detail: e.to_string(),
                })?;
            wrapper.categories
        }
    };

    resolve(categories, path)
}

/// Resolve deserialized category data into a frozen table.
fn resolve(categories: Vec<CategoryData>, file: &Path) -> Result<FactorTable, DataLoadError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for category in &categories {
        if !seen.insert(&category.name) {
            return Err(DataLoadError::DuplicateCategory {
                file: file.to_path_buf(),
                name: category.name.clone(),
            });
        }
    }

    let mut b = FactorTableBuilder::new();
    for category in &categories {
        // Unconditional defaults() call registers the category even when
        // every section is empty, so table validation can reject it.
        let defaults: Vec<(&str, f64)> =
            category.defaults.iter().map(|f| (f.unit(), f.value())).collect();
        b.defaults(&category.name, &defaults);

        for sub in &category.subcategories {
            let factors: Vec<(&str, f64)> =
                sub.factors.iter().map(|f| (f.unit(), f.value())).collect();
            b.subcategory(&category.name, &sub.name, &factors);
        }
        if !category.generic.is_empty() {
            let factors: Vec<(&str, f64)> =
                category.generic.iter().map(|f| (f.unit(), f.value())).collect();
            b.generic(&category.name, &factors);
        }
    }

    Ok(b.build()?)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use co2e_core::table::Tier;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "co2e_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Clean up a test directory.
    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    const RON_FACTORS: &str = r#"[
        (
            name: "power",
            defaults: [("kwh", 0.5), ("mwh", 500.0)],
            subcategories: [
                (name: "coal", factors: [("kwh", 0.9)]),
                (name: "wind", factors: [("kwh", 0.011)]),
            ],
            generic: [("kwh", 0.45)],
        ),
        (
            name: "scrap",
            subcategories: [(name: "metal_recycled", factors: [("kg", -5.0)])],
        ),
    ]"#;

    // -----------------------------------------------------------------------
    // detect_format / find_factor_file
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("factors.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("factors.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("factors.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        assert!(matches!(
            detect_format(Path::new("factors.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("factors")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn find_factor_file_found() {
        let dir = make_test_dir("find");
        fs::write(dir.join("factors.ron"), "[]").unwrap();

        let result = find_factor_file(&dir).unwrap();
        assert_eq!(result, Some(dir.join("factors.ron")));

        cleanup(&dir);
    }

    #[test]
    fn find_factor_file_missing() {
        let dir = make_test_dir("find_missing");
        assert_eq!(find_factor_file(&dir).unwrap(), None);
        cleanup(&dir);
    }

    #[test]
    fn find_factor_file_conflict() {
        let dir = make_test_dir("find_conflict");
        fs::write(dir.join("factors.ron"), "[]").unwrap();
        fs::write(dir.join("factors.json"), "[]").unwrap();

        assert!(matches!(
            find_factor_file(&dir),
            Err(DataLoadError::ConflictingFormats { .. })
        ));

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    #[test]
    fn load_ron_factors() {
        let dir = make_test_dir("load_ron");
        let path = dir.join("factors.ron");
        fs::write(&path, RON_FACTORS).unwrap();

        let table = load_factor_file(&path).unwrap();
        assert_eq!(table.list_categories(), ["power", "scrap"]);

        let m = table.lookup("power", Some("coal"), "kwh").unwrap();
        assert_eq!(m.factor, 0.9);
        assert_eq!(m.tier, Tier::Subcategory);

        let m = table.lookup("power", None, "kwh").unwrap();
        assert_eq!(m.tier, Tier::CategoryDefault);

        let m = table.lookup("scrap", Some("metal_recycled"), "kg").unwrap();
        assert_eq!(m.factor, -5.0);

        cleanup(&dir);
    }

    #[test]
    fn load_json_factors() {
        let dir = make_test_dir("load_json");
        let path = dir.join("factors.json");
        fs::write(
            &path,
            r#"[
                {
                    "name": "power",
                    "defaults": [["kwh", 0.5]],
                    "subcategories": [
                        {"name": "coal", "factors": [["kwh", 0.9]]}
                    ]
                }
            ]"#,
        )
        .unwrap();

        let table = load_factor_file(&path).unwrap();
        assert_eq!(table.lookup("power", Some("coal"), "kwh").unwrap().factor, 0.9);
        assert_eq!(table.lookup("power", None, "kwh").unwrap().factor, 0.5);

        cleanup(&dir);
    }

    #[test]
    fn load_toml_factors() {
        let dir = make_test_dir("load_toml");
        let path = dir.join("factors.toml");
        fs::write(
            &path,
            r#"
[[categories]]
name = "power"
defaults = [["kwh", 0.5]]

[[categories.subcategories]]
name = "coal"
factors = [["kwh", 0.9]]
"#,
        )
        .unwrap();

        let table = load_factor_file(&path).unwrap();
        assert_eq!(table.lookup("power", Some("coal"), "kwh").unwrap().factor, 0.9);
        assert_eq!(table.lookup("power", None, "kwh").unwrap().factor, 0.5);

        cleanup(&dir);
    }

    #[test]
    fn load_factor_table_from_dir() {
        let dir = make_test_dir("load_dir");
        fs::write(dir.join("factors.ron"), RON_FACTORS).unwrap();

        let table = load_factor_table(&dir).unwrap();
        assert_eq!(table.category_count(), 2);

        cleanup(&dir);
    }

    #[test]
    fn load_factor_table_missing_file() {
        let dir = make_test_dir("load_dir_missing");
        assert!(matches!(
            load_factor_table(&dir),
            Err(DataLoadError::MissingRequired { .. })
        ));
        cleanup(&dir);
    }

    #[test]
    fn parse_error_carries_file_path() {
        let dir = make_test_dir("parse_err");
        let path = dir.join("factors.json");
        fs::write(&path, "{not json").unwrap();

        match load_factor_file(&path) {
            Err(DataLoadError::Parse { file, .. }) => assert_eq!(file, path),
            other => panic!("expected Parse error, got: {other:?}"),
        }

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    #[test]
    fn duplicate_category_in_file_fails() {
        let dir = make_test_dir("dup_cat");
        let path = dir.join("factors.json");
        fs::write(
            &path,
            r#"[
                {"name": "power", "defaults": [["kwh", 0.5]]},
                {"name": "power", "defaults": [["mwh", 500.0]]}
            ]"#,
        )
        .unwrap();

        match load_factor_file(&path) {
            Err(DataLoadError::DuplicateCategory { name, .. }) => assert_eq!(name, "power"),
            other => panic!("expected DuplicateCategory, got: {other:?}"),
        }

        cleanup(&dir);
    }

    #[test]
    fn unnormalized_key_in_file_fails_table_validation() {
        let dir = make_test_dir("unnorm");
        let path = dir.join("factors.json");
        fs::write(&path, r#"[{"name": "power", "defaults": [["kWh", 0.5]]}]"#).unwrap();

        assert!(matches!(
            load_factor_file(&path),
            Err(DataLoadError::Table(TableBuildError::UnnormalizedKey { .. }))
        ));

        cleanup(&dir);
    }

    #[test]
    fn empty_category_in_file_fails_table_validation() {
        let dir = make_test_dir("empty_cat");
        let path = dir.join("factors.json");
        fs::write(&path, r#"[{"name": "power"}]"#).unwrap();

        assert!(matches!(
            load_factor_file(&path),
            Err(DataLoadError::Table(TableBuildError::EmptyCategory { .. }))
        ));

        cleanup(&dir);
    }
}
