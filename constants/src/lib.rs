//! Shared tuning values for the station world.

pub mod render_settings;
pub mod station;
pub mod storage_keys;
pub mod world;
