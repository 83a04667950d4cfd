//! Emission factor content for the CO2e calculation engine.
//!
//! Two sources of factor data, identical in semantics:
//!
//! - [`builtin`]: the scientifically sourced dataset compiled into the
//!   binary (DEFRA/EPA/IPCC/IEA), the default for deployments.
//! - [`loader`]: externalized factor files (RON/JSON/TOML) resolved through
//!   the same core builder, for deployments that maintain their own data.
//!
//! Tier ordering and normalization semantics live entirely in `co2e-core`;
//! this crate only supplies data.

pub mod builtin;
pub mod loader;
pub mod schema;

pub use builtin::{builtin_engine, builtin_table};
pub use loader::{DataLoadError, load_factor_file, load_factor_table};
