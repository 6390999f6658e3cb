//! Start-up loading for the station catalog.
//!
//! Requests the catalog JSON, validates it once it arrives and moves the
//! app to running or failed, reporting each stage to the host page.

/// Station catalog request, validation and state transitions.
pub mod catalog_loader;

/// Loading stage tracking for the host page.
pub mod progress;
