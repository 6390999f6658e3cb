//! Scene construction for the selected world theme.
//!
//! Lays out station anchors, scatters decorative props over a summed-noise
//! height field, spawns lights, markers and the camera, and animates the
//! world every frame.

/// Per-frame motion: bobbing islands, spinning crystals and flickering fires.
pub mod animation;

/// Sine-octave height field for terrain elevation, slope and ground meshes.
pub mod heightmap;

/// Station anchor table shared by the scene and the zone registry.
pub mod layout;

/// Visible station markers styled per station kind.
pub mod markers;

/// Seeded rejection sampling for decorative prop placement.
pub mod scatter;

/// World themes, their palettes and station layouts.
pub mod theme;

/// Startup system that builds the world for the selected theme.
pub mod world;
