use bevy::prelude::*;
use constants::station::{ZONE_RADIUS, ZONE_VERTICAL_BIAS};

use super::ray::{pointer_to_ndc, ray_from_ndc, ray_sphere_hit_t};
use crate::engine::assets::station_category::StationCategory;
use crate::engine::scene::layout::StationPositions;

/// Identity of a station: its category and index within that category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneTag {
    pub category: StationCategory,
    pub local_id: usize,
}

impl ZoneTag {
    pub fn new(category: StationCategory, local_id: usize) -> Self {
        Self { category, local_id }
    }
}

/// Invisible pick sphere over one station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationZone {
    /// Station anchor on the ground.
    pub position: Vec3,
    pub tag: ZoneTag,
}

impl StationZone {
    pub fn center(&self) -> Vec3 {
        self.position + Vec3::Y * ZONE_VERTICAL_BIAS
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneHit {
    pub tag: ZoneTag,
    pub distance: f32,
}

/// Registry of station pick volumes, built once from the scene layout.
#[derive(Debug, Default, Clone)]
pub struct ZoneRegistry {
    zones: Vec<StationZone>,
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every station of a layout, lists first in index order.
    pub fn from_positions(positions: &StationPositions) -> Self {
        let mut registry = Self::new();
        for (category, local_id, position) in positions.iter() {
            registry.register_zone(position, category, local_id);
        }
        registry
    }

    pub fn register_zone(&mut self, position: Vec3, category: StationCategory, local_id: usize) {
        self.zones.push(StationZone {
            position,
            tag: ZoneTag::new(category, local_id),
        });
    }

    pub fn zones(&self) -> &[StationZone] {
        &self.zones
    }

    /// Nearest zone along the ray. At equal distance the earlier registration wins.
    pub fn pick_ray(&self, ray: Ray3d) -> Option<ZoneHit> {
        let origin = ray.origin;
        let direction = ray.direction.as_vec3();

        let mut best: Option<ZoneHit> = None;
        for zone in &self.zones {
            let Some(t) = ray_sphere_hit_t(origin, direction, zone.center(), ZONE_RADIUS) else {
                continue;
            };
            if best.is_none_or(|b| t < b.distance) {
                best = Some(ZoneHit {
                    tag: zone.tag,
                    distance: t,
                });
            }
        }
        best
    }

    /// Screen-space pick through a camera's inverse view-projection.
    pub fn pick(&self, pointer: Vec2, viewport: Rect, world_from_clip: Mat4) -> Option<ZoneHit> {
        let ndc = pointer_to_ndc(pointer, viewport)?;
        let ray = ray_from_ndc(ndc, world_from_clip)?;
        self.pick_ray(ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::heightmap::HeightField;
    use crate::engine::scene::theme::WorldTheme;

    fn ray(origin: Vec3, direction: Vec3) -> Ray3d {
        Ray3d {
            origin,
            direction: Dir3::new(direction).unwrap(),
        }
    }

    #[test]
    fn nearest_zone_wins() {
        let mut registry = ZoneRegistry::new();
        registry.register_zone(Vec3::new(100.0, 0.0, 0.0), StationCategory::Fire, 0);
        registry.register_zone(Vec3::new(50.0, 0.0, 0.0), StationCategory::Herb, 0);

        let hit = registry
            .pick_ray(ray(Vec3::new(0.0, ZONE_VERTICAL_BIAS, 0.0), Vec3::X))
            .unwrap();
        assert_eq!(hit.tag, ZoneTag::new(StationCategory::Herb, 0));
        assert!((hit.distance - 38.0).abs() < 1e-3);
    }

    #[test]
    fn coincident_zones_resolve_to_first_registered() {
        let mut registry = ZoneRegistry::new();
        registry.register_zone(Vec3::new(40.0, 0.0, 0.0), StationCategory::Cart, 0);
        registry.register_zone(Vec3::new(40.0, 0.0, 0.0), StationCategory::Memorial, 0);

        let hit = registry
            .pick_ray(ray(Vec3::new(0.0, ZONE_VERTICAL_BIAS, 0.0), Vec3::X))
            .unwrap();
        assert_eq!(hit.tag.category, StationCategory::Cart);
    }

    #[test]
    fn zones_are_lifted_above_the_anchor() {
        let mut registry = ZoneRegistry::new();
        registry.register_zone(Vec3::ZERO, StationCategory::Cabin, 3);

        let over_top = ZONE_VERTICAL_BIAS + ZONE_RADIUS - 1.0;
        let below = ZONE_VERTICAL_BIAS - ZONE_RADIUS - 1.0;
        assert!(registry.pick_ray(ray(Vec3::new(-50.0, over_top, 0.0), Vec3::X)).is_some());
        assert!(registry.pick_ray(ray(Vec3::new(-50.0, below, 0.0), Vec3::X)).is_none());
    }

    #[test]
    fn empty_sky_is_no_hit() {
        let mut registry = ZoneRegistry::new();
        registry.register_zone(Vec3::ZERO, StationCategory::Fire, 1);
        assert!(registry.pick_ray(ray(Vec3::new(0.0, 200.0, 0.0), Vec3::Y)).is_none());
    }

    #[test]
    fn screen_pick_goes_through_the_camera() {
        let mut registry = ZoneRegistry::new();
        registry.register_zone(Vec3::ZERO, StationCategory::Garden, 0);

        let projection = Mat4::perspective_infinite_reverse_rh(0.8, 4.0 / 3.0, 0.1);
        let camera = Mat4::from_translation(Vec3::new(0.0, ZONE_VERTICAL_BIAS, 120.0));
        let world_from_clip = camera * projection.inverse();
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);

        let centre = registry.pick(Vec2::new(400.0, 300.0), viewport, world_from_clip);
        assert_eq!(centre.map(|h| h.tag.category), Some(StationCategory::Garden));

        let corner = registry.pick(Vec2::new(2.0, 2.0), viewport, world_from_clip);
        assert!(corner.is_none());

        let outside = registry.pick(Vec2::new(900.0, 300.0), viewport, world_from_clip);
        assert!(outside.is_none());
    }

    #[test]
    fn registry_from_layout_registers_every_station() {
        let positions = WorldTheme::CrystalGarden.station_positions(&HeightField::flat());
        let registry = ZoneRegistry::from_positions(&positions);

        assert_eq!(registry.zones().len(), constants::station::TOTAL_STATIONS);
        assert_eq!(registry.zones()[0].tag, ZoneTag::new(StationCategory::Cabin, 0));
        let fire = registry
            .zones()
            .iter()
            .find(|z| z.tag == ZoneTag::new(StationCategory::Fire, 2))
            .unwrap();
        assert_eq!(fire.position, positions.fires[2]);
    }
}
