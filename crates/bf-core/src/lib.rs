//! bf-core: stable foundation for blastflow.
//!
//! Contains:
//! - units (uom SI types + constructors, thermodynamic reference constants)
//! - numeric (Real + small magnitudes + density floor)
//! - dictionary (keyed configuration input)
//! - selection (name -> constructor tables)
//! - error (shared error types)

pub mod dictionary;
pub mod error;
pub mod numeric;
pub mod selection;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use dictionary::{DictValue, Dictionary};
pub use error::{BfError, BfResult};
pub use numeric::*;
pub use selection::select;
pub use units::*;
