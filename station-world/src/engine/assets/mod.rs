//! Static station content and category definitions.
//!
//! The catalog is authored as JSON and loaded through the asset server so a
//! deployment can swap copy without rebuilding the engine.

/// Station catalog asset: elder visits and experience descriptors.
pub mod station_catalog;

/// The eight station kinds and their persistence names.
pub mod station_category;
