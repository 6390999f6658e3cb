use bevy::prelude::*;

/// Convert a pointer position (logical pixels, y down) to normalised device
/// coordinates (y up, both axes in [-1, 1]). Pointers outside the viewport miss.
pub fn pointer_to_ndc(pointer: Vec2, viewport: Rect) -> Option<Vec2> {
    if viewport.width() <= 0.0 || viewport.height() <= 0.0 || !viewport.contains(pointer) {
        return None;
    }
    let local = pointer - viewport.min;
    Some(Vec2::new(
        local.x / viewport.width() * 2.0 - 1.0,
        1.0 - local.y / viewport.height() * 2.0,
    ))
}

/// Inverse view-projection of a camera, mapping clip space back to world space.
pub fn camera_world_from_clip(camera: &Camera, camera_transform: &GlobalTransform) -> Mat4 {
    camera_transform.compute_matrix() * camera.clip_from_view().inverse()
}

/// World-space ray through an NDC point. Bevy projections use reverse depth,
/// so the near plane sits at z = 1.
pub fn ray_from_ndc(ndc: Vec2, world_from_clip: Mat4) -> Option<Ray3d> {
    let near = world_from_clip.project_point3(ndc.extend(1.0));
    let far = world_from_clip.project_point3(ndc.extend(f32::EPSILON));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d {
        origin: near,
        direction,
    })
}

// Geometric ray-sphere test, returns the entry distance, or the exit distance
// when the origin is inside the sphere.
pub fn ray_sphere_hit_t(
    ray_origin: Vec3,
    ray_direction: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let (tmin, tmax) = (-b - root, -b + root);
    if tmax < 0.0 {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}
