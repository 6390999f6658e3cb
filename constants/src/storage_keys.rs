/// Durable flag set once the welcome modal has been dismissed.
pub const FIRST_VISIT: &str = "station_world.first_visit";

/// JSON array of visited station keys.
pub const VISITED: &str = "station_world.visited";

/// Native progress file, relative to the working directory.
pub const DEFAULT_PROGRESS_FILE: &str = "station_world_progress.json";
