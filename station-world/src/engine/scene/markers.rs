use bevy::prelude::*;

use crate::engine::assets::station_category::StationCategory;

/// Visible structure drawn at a station anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerShape {
    /// Box body with a pitched roof.
    Cabin,
    /// Stone ring with a glowing ember and flickering light.
    FireRing,
    Bush,
    LogStack,
    GardenBed,
    Cart,
    FishingPole,
    Standing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub color: Color,
}

impl MarkerStyle {
    pub fn for_category(category: StationCategory) -> Self {
        let (shape, color) = match category {
            StationCategory::Cabin => (MarkerShape::Cabin, Color::srgb(0.46, 0.30, 0.18)),
            StationCategory::Fire => (MarkerShape::FireRing, Color::srgb(0.42, 0.40, 0.38)),
            StationCategory::Herb => (MarkerShape::Bush, Color::srgb(0.30, 0.58, 0.26)),
            StationCategory::LogPile => (MarkerShape::LogStack, Color::srgb(0.52, 0.36, 0.20)),
            StationCategory::Garden => (MarkerShape::GardenBed, Color::srgb(0.40, 0.30, 0.20)),
            StationCategory::Cart => (MarkerShape::Cart, Color::srgb(0.60, 0.44, 0.26)),
            StationCategory::Fishing => (MarkerShape::FishingPole, Color::srgb(0.70, 0.62, 0.44)),
            StationCategory::Memorial => (MarkerShape::Standing, Color::srgb(0.62, 0.62, 0.64)),
        };
        Self { shape, color }
    }
}

/// Tag on the root entity of every station marker.
#[derive(Component, Debug, Clone, Copy)]
pub struct StationMarker {
    pub category: StationCategory,
    pub local_id: usize,
}

/// One mesh part of a marker, relative to the station anchor.
pub struct MarkerPart {
    pub mesh: Mesh,
    pub offset: Vec3,
    pub rotation: Quat,
    pub color: Color,
    pub emissive: LinearRgba,
}

impl MarkerPart {
    fn solid(mesh: impl Into<Mesh>, offset: Vec3, color: Color) -> Self {
        Self {
            mesh: mesh.into(),
            offset,
            rotation: Quat::IDENTITY,
            color,
            emissive: LinearRgba::BLACK,
        }
    }

    fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    fn glowing(mut self, emissive: LinearRgba) -> Self {
        self.emissive = emissive;
        self
    }
}

/// Mesh parts that make up a marker. Every shape stays inside the station's pick sphere.
pub fn marker_parts(style: MarkerStyle) -> Vec<MarkerPart> {
    let c = style.color;
    match style.shape {
        MarkerShape::Cabin => vec![
            MarkerPart::solid(Cuboid::new(14.0, 9.0, 11.0), Vec3::Y * 4.5, c),
            MarkerPart::solid(Cone::new(10.0, 6.0), Vec3::Y * 12.0, Color::srgb(0.30, 0.20, 0.14)),
            MarkerPart::solid(Cuboid::new(3.0, 5.0, 0.4), Vec3::new(0.0, 2.5, 5.6), Color::srgb(0.22, 0.14, 0.08)),
        ],
        MarkerShape::FireRing => vec![
            MarkerPart::solid(Torus::new(3.0, 4.5), Vec3::Y * 0.5, c),
            MarkerPart::solid(Sphere::new(2.2), Vec3::Y * 1.8, Color::srgb(1.0, 0.5, 0.15))
                .glowing(LinearRgba::rgb(12.0, 4.0, 0.8)),
        ],
        MarkerShape::Bush => vec![
            MarkerPart::solid(Sphere::new(4.5), Vec3::Y * 3.5, c),
            MarkerPart::solid(Sphere::new(3.0), Vec3::new(3.5, 2.5, 1.0), c),
        ],
        MarkerShape::LogStack => (0..3)
            .map(|i| {
                let offset = Vec3::new(0.0, 1.5 + i as f32 * 2.6, (i as f32 - 1.0) * 0.6);
                MarkerPart::solid(Cylinder::new(1.4, 12.0), offset, c)
                    .rotated(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2))
            })
            .collect(),
        MarkerShape::GardenBed => vec![
            MarkerPart::solid(Cuboid::new(16.0, 1.2, 10.0), Vec3::Y * 0.6, c),
            MarkerPart::solid(Cuboid::new(14.0, 1.6, 1.2), Vec3::new(0.0, 2.0, -2.5), Color::srgb(0.36, 0.62, 0.28)),
            MarkerPart::solid(Cuboid::new(14.0, 1.6, 1.2), Vec3::new(0.0, 2.0, 2.5), Color::srgb(0.36, 0.62, 0.28)),
        ],
        MarkerShape::Cart => vec![
            MarkerPart::solid(Cuboid::new(10.0, 4.0, 6.0), Vec3::Y * 4.0, c),
            MarkerPart::solid(Cylinder::new(2.0, 0.8), Vec3::new(-3.0, 2.0, 3.4), Color::srgb(0.25, 0.18, 0.12))
                .rotated(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
            MarkerPart::solid(Cylinder::new(2.0, 0.8), Vec3::new(3.0, 2.0, 3.4), Color::srgb(0.25, 0.18, 0.12))
                .rotated(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
        ],
        MarkerShape::FishingPole => vec![
            MarkerPart::solid(Cuboid::new(8.0, 1.0, 12.0), Vec3::Y * 0.5, Color::srgb(0.45, 0.34, 0.22)),
            MarkerPart::solid(Cylinder::new(0.3, 16.0), Vec3::new(0.0, 8.0, 3.0), c)
                .rotated(Quat::from_rotation_x(0.5)),
        ],
        MarkerShape::Standing => vec![
            MarkerPart::solid(Cuboid::new(6.0, 1.0, 6.0), Vec3::Y * 0.5, c),
            MarkerPart::solid(Cuboid::new(3.0, 14.0, 2.0), Vec3::Y * 8.0, c),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_get_their_own_shape() {
        assert_eq!(MarkerStyle::for_category(StationCategory::Cabin).shape, MarkerShape::Cabin);
        assert_eq!(MarkerStyle::for_category(StationCategory::Fire).shape, MarkerShape::FireRing);
        assert_eq!(MarkerStyle::for_category(StationCategory::Memorial).shape, MarkerShape::Standing);

        let mut shapes: Vec<MarkerShape> = Vec::new();
        for category in StationCategory::ALL {
            let shape = MarkerStyle::for_category(category).shape;
            assert!(!shapes.contains(&shape), "{category} shares a shape");
            shapes.push(shape);
        }
    }

    #[test]
    fn every_category_has_parts() {
        for category in StationCategory::ALL {
            assert!(!marker_parts(MarkerStyle::for_category(category)).is_empty());
        }
    }
}
