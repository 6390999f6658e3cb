use bevy::prelude::*;

/// Vertical sine motion around a resting height.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bob {
    pub base_y: f32,
    pub amplitude: f32,
    pub speed: f32,
    pub phase: f32,
}

impl Bob {
    pub fn offset_at(&self, elapsed: f32) -> f32 {
        self.amplitude * (elapsed * self.speed + self.phase).sin()
    }
}

/// Constant rotation about the Y axis, radians per second.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spin {
    pub speed: f32,
}

/// Point light intensity jitter for fires.
#[derive(Component, Debug, Clone, Copy)]
pub struct Flicker {
    pub base_intensity: f32,
    pub phase: f32,
}

impl Flicker {
    /// Two detuned sines keep the flicker from looking periodic. Never below 60% of base.
    pub fn intensity_at(&self, elapsed: f32) -> f32 {
        let t = elapsed + self.phase;
        let wobble = 0.5 + 0.25 * (t * 9.3).sin() + 0.25 * (t * 23.7).sin();
        self.base_intensity * (0.6 + 0.4 * wobble)
    }
}

/// Per-frame world motion driven by elapsed time.
pub fn animate_world(
    time: Res<Time>,
    mut bobbing: Query<(&Bob, &mut Transform), Without<Spin>>,
    mut spinning: Query<(&Spin, &mut Transform), Without<Bob>>,
    mut fires: Query<(&Flicker, &mut PointLight)>,
) {
    let elapsed = time.elapsed_secs();
    let delta = time.delta_secs();

    for (bob, mut transform) in &mut bobbing {
        transform.translation.y = bob.base_y + bob.offset_at(elapsed);
    }

    for (spin, mut transform) in &mut spinning {
        transform.rotate_y(spin.speed * delta);
    }

    for (flicker, mut light) in &mut fires {
        light.intensity = flicker.intensity_at(elapsed);
    }
}
