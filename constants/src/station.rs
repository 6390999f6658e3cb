/// Radius of the invisible pick sphere placed over every station.
pub const ZONE_RADIUS: f32 = 12.0;

/// Height of the pick sphere centre above the station anchor.
pub const ZONE_VERTICAL_BIAS: f32 = 8.0;

/// Elder cabins in every world.
pub const ELDER_CABIN_COUNT: usize = 6;

/// Fire circles in every world.
pub const FIRE_COUNT: usize = 6;

/// Herb, log pile, garden, cart, fishing and memorial.
pub const SINGLE_STATION_COUNT: usize = 6;

/// Denominator of the progress ratio.
pub const TOTAL_STATIONS: usize = ELDER_CABIN_COUNT + FIRE_COUNT + SINGLE_STATION_COUNT;

/// How long a correct/wrong mark stays on an answer before it resolves.
pub const ANSWER_FEEDBACK_DELAY_MS: u64 = 500;

/// How long the journey-complete banner stays on screen.
pub const COMPLETION_NOTICE_SECS: f32 = 6.0;

/// Line shown instead of the narrative when an elder was already visited.
pub const WELCOME_BACK_LINE: &str =
    "Welcome back, friend. You have already shared this teaching with me. Walk on and visit the others.";
