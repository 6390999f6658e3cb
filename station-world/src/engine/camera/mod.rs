//! Viewport camera for exploring the station world.
//!
//! Provides orbit camera controls with smooth interpolation, keyboard/mouse
//! input handling, and the HDR post-processing stack the world is viewed through.

/// Viewport camera resource, input gate and controller system.
pub mod viewport_camera;
