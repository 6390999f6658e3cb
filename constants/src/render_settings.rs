use bevy::color::Color;

pub const BLOOM_INTENSITY: f32 = 0.18;

pub const FOG_START: f32 = 260.0;
pub const FOG_END: f32 = 620.0;

pub const CAMERA_START_DISTANCE: f32 = 320.0;
pub const CAMERA_MIN_DISTANCE: f32 = 40.0;
pub const CAMERA_MAX_DISTANCE: f32 = 700.0;
pub const CAMERA_START_PITCH: f32 = -0.55;

pub const OVERLAY_BACKDROP: Color = Color::srgba(0.02, 0.03, 0.05, 0.72);
pub const OVERLAY_PANEL: Color = Color::srgb(0.10, 0.11, 0.14);
pub const OVERLAY_TEXT: Color = Color::srgb(0.93, 0.92, 0.88);
pub const OVERLAY_MUTED_TEXT: Color = Color::srgb(0.68, 0.67, 0.63);
pub const BUTTON_IDLE: Color = Color::srgb(0.22, 0.24, 0.28);
pub const BUTTON_HOVER: Color = Color::srgb(0.26, 0.28, 0.32);
pub const BUTTON_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);
pub const ANSWER_CORRECT: Color = Color::srgb(0.16, 0.62, 0.28);
pub const ANSWER_WRONG: Color = Color::srgb(0.72, 0.18, 0.18);
pub const PROGRESS_TRACK: Color = Color::srgb(0.16, 0.17, 0.20);
pub const PROGRESS_FILL: Color = Color::srgb(0.93, 0.68, 0.25);
