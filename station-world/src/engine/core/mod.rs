//! Core application setup and state management.
//!
//! Handles application lifecycle, start-up configuration, window settings
//! and state transitions for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Builds the app from the start-up configuration: world resources,
/// catalog loading, interaction and the host bridge.
pub mod app_setup;

/// Application state machine: loading, running, or failed to start.
pub mod app_state;

/// Start-up configuration from the command line or the page URL.
pub mod config;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
