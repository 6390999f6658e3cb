use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::MouseScrollUnit;
use bevy::math::EulerRot;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
};
use constants::render_settings::{
    BLOOM_INTENSITY, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, CAMERA_START_DISTANCE,
    CAMERA_START_PITCH, FOG_END, FOG_START,
};
use constants::world::WORLD_RADIUS;

/// Whether the orbit controller may react to input. Overlays switch it off while open.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraControls {
    pub enabled: bool,
}

impl Default for CameraControls {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Orbit camera target. The camera transform eases toward it every frame.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewportCamera {
    pub focus_point: Vec3,
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
}

const YAW_SENSITIVITY: f32 = 0.0035;
const PITCH_SENSITIVITY: f32 = 0.0030;
const MIN_PITCH: f32 = -1.45;
const MAX_PITCH: f32 = -0.08;

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            focus_point: Vec3::ZERO,
            distance: CAMERA_START_DISTANCE,
            pitch: CAMERA_START_PITCH,
            yaw: 0.0,
        }
    }
}

impl ViewportCamera {
    fn view_rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Where the camera should be, looking at the focus point from `distance` away.
    pub fn target_transform(&self) -> Transform {
        let rotation = self.view_rotation();
        Transform {
            translation: self.focus_point + rotation * Vec3::Z * self.distance,
            rotation,
            ..default()
        }
    }

    /// Right-drag orbit. Pitch stays above the horizon.
    pub fn orbit(&mut self, mouse_delta: Vec2) {
        self.yaw -= mouse_delta.x * YAW_SENSITIVITY;
        self.pitch = (self.pitch - mouse_delta.y * PITCH_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Scroll zoom, proportional to the current distance.
    pub fn zoom(&mut self, scroll: f32) {
        let factor = (1.0 - scroll * 0.1).clamp(0.5, 1.5);
        self.distance = (self.distance * factor).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// WASD pan in the ground plane relative to the view heading. The focus never leaves the world.
    pub fn pan(&mut self, input: Vec2, speed: f32, dt: f32) {
        if input == Vec2::ZERO {
            return;
        }
        let heading = Quat::from_rotation_y(self.yaw);
        let forward = heading * Vec3::NEG_Z;
        let right = heading * Vec3::X;
        let delta = (right * input.x + forward * input.y).normalize() * speed * dt;

        let moved = self.focus_point + delta;
        let flat = moved.xz().clamp_length_max(WORLD_RADIUS);
        self.focus_point = Vec3::new(flat.x, moved.y, flat.y);
    }
}

/// HDR camera with bloom, filmic tonemapping and distance fog.
pub fn spawn_viewport_camera(commands: &mut Commands, fog_color: Color) {
    let viewport = ViewportCamera::default();
    commands.spawn((
        Camera3d::default(),
        Camera {
            hdr: true,
            ..default()
        },
        Tonemapping::TonyMcMapface,
        Bloom {
            intensity: BLOOM_INTENSITY,
            ..Bloom::NATURAL
        },
        DistanceFog {
            color: fog_color,
            falloff: FogFalloff::Linear {
                start: FOG_START,
                end: FOG_END,
            },
            ..default()
        },
        viewport.target_transform(),
    ));
    commands.insert_resource(viewport);
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut viewport: ResMut<ViewportCamera>,
    controls: Res<CameraControls>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    if controls.enabled {
        let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
        if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
            viewport.orbit(mouse_delta);
        }

        // Pixel and line scroll
        let mut scroll_accum = 0.0;
        for ev in scroll_events.read() {
            scroll_accum += match ev.unit {
                MouseScrollUnit::Line => ev.y,
                MouseScrollUnit::Pixel => ev.y * 0.05,
            };
        }
        if scroll_accum.abs() > f32::EPSILON {
            viewport.zoom(scroll_accum);
        }

        let mut move_input = Vec2::ZERO;
        if keyboard.pressed(KeyCode::KeyW) {
            move_input.y += 1.0;
        }
        if keyboard.pressed(KeyCode::KeyS) {
            move_input.y -= 1.0;
        }
        if keyboard.pressed(KeyCode::KeyD) {
            move_input.x += 1.0;
        }
        if keyboard.pressed(KeyCode::KeyA) {
            move_input.x -= 1.0;
        }

        // Shift = faster
        let mut speed = (viewport.distance * 0.6).clamp(20.0, 300.0);
        if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
            speed *= 2.5;
        }
        viewport.pan(move_input, speed, time.delta_secs());
    } else {
        // Input that arrives while an overlay is open is dropped, not replayed on close.
        mouse_motion.clear();
        scroll_events.clear();
    }

    let target = viewport.target_transform();
    let lerp_speed = (8.0 * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform
        .translation
        .lerp(target.translation, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target.rotation, lerp_speed);
}
