/// Radius of the playable disc every theme lays its stations out in.
pub const WORLD_RADIUS: f32 = 220.0;

/// Decorative props never land closer than this to each other.
pub const PROP_MIN_SPACING: f32 = 9.0;

/// Clearance kept free of props around every station anchor.
pub const STATION_CLEARANCE: f32 = 24.0;

/// Upper bound on rejection-sampling attempts per requested prop.
pub const SCATTER_ATTEMPTS_PER_PROP: usize = 40;

/// Seed for the decorative scatter so every visit sees the same world.
pub const SCATTER_SEED: u64 = 0x5EED_57A7;

/// Props requested per theme.
pub const PROP_COUNT: usize = 140;

/// Terrain below this height is water and never receives props.
pub const WATER_LEVEL: f32 = -4.0;

/// Maximum terrain slope (rise over run) a prop may stand on.
pub const MAX_PROP_SLOPE: f32 = 0.6;
