//! Data backend for the "Decade of Transformation" countries dashboard.
//!
//! Loads one flat CSV per dataset, reshapes it into the record shape its
//! chart expects, and exposes the result in serializable form (record
//! arrays, a nested tourism tree, a diplomacy node/edge graph). Chart
//! rendering and page layout live elsewhere; JSON-style serialization of
//! these structures is the interface boundary.

pub mod config;
pub mod data;
pub mod error;

pub use config::{DataConfig, Dataset};
pub use data::loader::{load_dataset, ChartData};
pub use error::DataError;
