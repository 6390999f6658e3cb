use bevy::prelude::*;
use constants::world::WORLD_RADIUS;

use super::heightmap::HeightField;
use super::layout::{StationPositions, ring};

/// Visual world the stations are laid out in.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorldTheme {
    #[default]
    FloatingIslands,
    CrystalGarden,
    Diorama,
    Terrain,
}

/// Kind of decorative prop a theme scatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    FloatingRock,
    Crystal,
    Block,
    Tree,
}

/// Colours a theme paints its world with.
#[derive(Debug, Clone, Copy)]
pub struct ThemePalette {
    pub sky: Color,
    pub fog: Color,
    pub ground: Color,
    pub prop: Color,
    /// Emissive tint for glowing props; black for none.
    pub prop_glow: LinearRgba,
    pub ambient_brightness: f32,
}

impl WorldTheme {
    pub const ALL: [WorldTheme; 4] = [
        Self::FloatingIslands,
        Self::CrystalGarden,
        Self::Diorama,
        Self::Terrain,
    ];

    /// Convert config value to theme, case-insensitively.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "islands" | "floating-islands" => Some(Self::FloatingIslands),
            "crystal" | "crystal-garden" => Some(Self::CrystalGarden),
            "diorama" => Some(Self::Diorama),
            "terrain" => Some(Self::Terrain),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FloatingIslands => "islands",
            Self::CrystalGarden => "crystal",
            Self::Diorama => "diorama",
            Self::Terrain => "terrain",
        }
    }

    pub fn height_field(&self) -> HeightField {
        match self {
            Self::Terrain => HeightField::rolling(),
            _ => HeightField::flat(),
        }
    }

    pub fn prop_kind(&self) -> PropKind {
        match self {
            Self::FloatingIslands => PropKind::FloatingRock,
            Self::CrystalGarden => PropKind::Crystal,
            Self::Diorama => PropKind::Block,
            Self::Terrain => PropKind::Tree,
        }
    }

    pub fn palette(&self) -> ThemePalette {
        match self {
            Self::FloatingIslands => ThemePalette {
                sky: Color::srgb(0.55, 0.72, 0.92),
                fog: Color::srgb(0.72, 0.82, 0.95),
                ground: Color::srgb(0.36, 0.56, 0.30),
                prop: Color::srgb(0.48, 0.44, 0.40),
                prop_glow: LinearRgba::BLACK,
                ambient_brightness: 600.0,
            },
            Self::CrystalGarden => ThemePalette {
                sky: Color::srgb(0.03, 0.02, 0.08),
                fog: Color::srgb(0.08, 0.05, 0.16),
                ground: Color::srgb(0.10, 0.09, 0.16),
                prop: Color::srgb(0.55, 0.35, 0.95),
                prop_glow: LinearRgba::rgb(2.0, 0.9, 4.0),
                ambient_brightness: 250.0,
            },
            Self::Diorama => ThemePalette {
                sky: Color::srgb(0.93, 0.89, 0.82),
                fog: Color::srgb(0.93, 0.89, 0.82),
                ground: Color::srgb(0.62, 0.74, 0.46),
                prop: Color::srgb(0.32, 0.55, 0.36),
                prop_glow: LinearRgba::BLACK,
                ambient_brightness: 900.0,
            },
            Self::Terrain => ThemePalette {
                sky: Color::srgb(0.62, 0.76, 0.88),
                fog: Color::srgb(0.70, 0.78, 0.84),
                ground: Color::srgb(0.34, 0.48, 0.26),
                prop: Color::srgb(0.18, 0.38, 0.20),
                prop_glow: LinearRgba::BLACK,
                ambient_brightness: 500.0,
            },
        }
    }

    /// Deterministic station anchors for this theme. Terrain anchors sit on the height field.
    pub fn station_positions(&self, height: &HeightField) -> StationPositions {
        match self {
            Self::FloatingIslands => {
                // Each ring floats at its own altitude; singles wobble around theirs.
                let cabins = lift(ring(6, WORLD_RADIUS * 0.78, 0.0), |i| 24.0 + 6.0 * (i as f32).sin());
                let fires = lift(ring(6, WORLD_RADIUS * 0.48, 0.52), |_| 12.0);
                let singles = lift(ring(6, WORLD_RADIUS * 0.2, 0.26), |i| 4.0 + 3.0 * (i as f32 * 1.3).cos());
                assemble(cabins, fires, singles)
            }
            Self::CrystalGarden => {
                let cabins = lift(ring(6, WORLD_RADIUS * 0.8, 0.26), |_| 0.0);
                let fires = lift(ring(6, WORLD_RADIUS * 0.52, 0.0), |_| 0.0);
                let singles = lift(ring(6, WORLD_RADIUS * 0.24, 0.52), |_| 0.0);
                assemble(cabins, fires, singles)
            }
            Self::Diorama => {
                // Three rows across a rectangular board: cabins at the back, singles at the front.
                let row = |z: f32| -> Vec<Vec3> {
                    (0..6)
                        .map(|i| Vec3::new((i as f32 - 2.5) * WORLD_RADIUS * 0.3, 0.0, z))
                        .collect()
                };
                assemble(
                    row(-WORLD_RADIUS * 0.4),
                    row(0.0),
                    row(WORLD_RADIUS * 0.4),
                )
            }
            Self::Terrain => {
                let on_ground = |points: Vec<Vec2>| -> Vec<Vec3> {
                    points
                        .into_iter()
                        .map(|p| Vec3::new(p.x, height.height(p.x, p.y), p.y))
                        .collect()
                };
                let cabins = on_ground(ring(6, WORLD_RADIUS * 0.75, 0.4));
                let fires = on_ground(ring(6, WORLD_RADIUS * 0.5, 0.92));
                let singles = on_ground(ring(6, WORLD_RADIUS * 0.25, 0.1));
                assemble(cabins, fires, singles)
            }
        }
    }
}

fn lift(points: Vec<Vec2>, altitude: impl Fn(usize) -> f32) -> Vec<Vec3> {
    points
        .into_iter()
        .enumerate()
        .map(|(i, p)| Vec3::new(p.x, altitude(i), p.y))
        .collect()
}

fn assemble(cabins: Vec<Vec3>, fires: Vec<Vec3>, singles: Vec<Vec3>) -> StationPositions {
    let mut singles = singles.into_iter();
    let mut next = || singles.next().unwrap_or_default();
    let anchors = [next(), next(), next(), next(), next(), next()];
    StationPositions::from_anchors(cabins, fires, anchors)
}
