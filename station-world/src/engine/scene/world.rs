use bevy::prelude::*;
use constants::world::{
    MAX_PROP_SLOPE, PROP_COUNT, PROP_MIN_SPACING, SCATTER_ATTEMPTS_PER_PROP, SCATTER_SEED,
    STATION_CLEARANCE, WATER_LEVEL, WORLD_RADIUS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::animation::{Bob, Flicker, Spin};
use super::heightmap::HeightField;
use super::layout::StationPositions;
use super::markers::{MarkerShape, MarkerStyle, StationMarker, marker_parts};
use super::scatter::{ScatterRules, scatter};
use super::theme::{PropKind, ThemePalette, WorldTheme};
use crate::engine::camera::viewport_camera::spawn_viewport_camera;

/// Build the selected world: lights, ground, station markers, props and the camera.
pub fn spawn_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    theme: Res<WorldTheme>,
    height: Res<HeightField>,
    positions: Res<StationPositions>,
) {
    let palette = theme.palette();

    commands.insert_resource(ClearColor(palette.sky));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: palette.ambient_brightness,
        ..default()
    });

    spawn_lighting(&mut commands);
    spawn_ground(&mut commands, &mut meshes, &mut materials, *theme, &height, &positions, &palette);
    spawn_station_markers(&mut commands, &mut meshes, &mut materials, &positions);
    let props = spawn_props(&mut commands, &mut meshes, &mut materials, *theme, &height, &positions, &palette);
    spawn_viewport_camera(&mut commands, palette.fog);

    info!(
        "World '{}' built: {} stations, {} props",
        theme.as_str(),
        positions.len(),
        props
    );
}

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}

fn spawn_ground(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    theme: WorldTheme,
    height: &HeightField,
    positions: &StationPositions,
    palette: &ThemePalette,
) {
    let ground = materials.add(StandardMaterial {
        base_color: palette.ground,
        perceptual_roughness: 0.9,
        ..default()
    });

    match theme {
        WorldTheme::FloatingIslands => {
            // One island under every station, rock tapering away underneath.
            let top = meshes.add(Cylinder::new(17.0, 4.0));
            let underside = meshes.add(Cone::new(17.0, 22.0));
            let rock = materials.add(StandardMaterial {
                base_color: palette.prop,
                perceptual_roughness: 1.0,
                ..default()
            });
            for anchor in positions.all_anchors() {
                commands.spawn((
                    Mesh3d(top.clone()),
                    MeshMaterial3d(ground.clone()),
                    Transform::from_translation(anchor - Vec3::Y * 2.0),
                ));
                commands.spawn((
                    Mesh3d(underside.clone()),
                    MeshMaterial3d(rock.clone()),
                    Transform::from_translation(anchor - Vec3::Y * 15.0)
                        .with_rotation(Quat::from_rotation_x(std::f32::consts::PI)),
                ));
            }
        }
        WorldTheme::CrystalGarden => {
            let floor = materials.add(StandardMaterial {
                base_color: palette.ground,
                perceptual_roughness: 0.15,
                metallic: 0.4,
                ..default()
            });
            commands.spawn((
                Mesh3d(meshes.add(Circle::new(WORLD_RADIUS + 60.0))),
                MeshMaterial3d(floor),
                Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
            ));
        }
        WorldTheme::Diorama => {
            commands.spawn((
                Mesh3d(meshes.add(Cuboid::new(WORLD_RADIUS * 2.1, 8.0, WORLD_RADIUS * 1.3))),
                MeshMaterial3d(ground),
                Transform::from_xyz(0.0, -4.0, 0.0),
            ));
        }
        WorldTheme::Terrain => {
            commands.spawn((
                Mesh3d(meshes.add(height.mesh(WORLD_RADIUS * 2.6, 96))),
                MeshMaterial3d(ground),
                Transform::IDENTITY,
            ));
            let water = materials.add(StandardMaterial {
                base_color: Color::srgba(0.18, 0.38, 0.55, 0.75),
                alpha_mode: AlphaMode::Blend,
                perceptual_roughness: 0.1,
                ..default()
            });
            commands.spawn((
                Mesh3d(meshes.add(Circle::new(WORLD_RADIUS * 1.3))),
                MeshMaterial3d(water),
                Transform::from_xyz(0.0, WATER_LEVEL, 0.0)
                    .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
            ));
        }
    }
}

fn spawn_station_markers(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    positions: &StationPositions,
) {
    for (category, local_id, anchor) in positions.iter() {
        let style = MarkerStyle::for_category(category);
        let parts = marker_parts(style);

        commands
            .spawn((
                StationMarker { category, local_id },
                Transform::from_translation(anchor),
                Visibility::default(),
            ))
            .with_children(|parent| {
                for part in parts {
                    let material = materials.add(StandardMaterial {
                        base_color: part.color,
                        emissive: part.emissive,
                        perceptual_roughness: 0.85,
                        ..default()
                    });
                    parent.spawn((
                        Mesh3d(meshes.add(part.mesh)),
                        MeshMaterial3d(material),
                        Transform::from_translation(part.offset).with_rotation(part.rotation),
                    ));
                }

                if style.shape == MarkerShape::FireRing {
                    let flicker = Flicker {
                        base_intensity: 400_000.0,
                        phase: local_id as f32 * 1.7,
                    };
                    parent.spawn((
                        PointLight {
                            color: Color::srgb(1.0, 0.62, 0.3),
                            intensity: flicker.base_intensity,
                            range: 60.0,
                            ..default()
                        },
                        flicker,
                        Transform::from_xyz(0.0, 4.0, 0.0),
                    ));
                }
            });
    }
}

/// Scatter decorative props for the theme. Returns how many were placed.
fn spawn_props(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    theme: WorldTheme,
    height: &HeightField,
    positions: &StationPositions,
    palette: &ThemePalette,
) -> usize {
    let anchors = positions.all_anchors();
    let accept = |p: Vec2| match theme {
        WorldTheme::Terrain => {
            height.height(p.x, p.y) > WATER_LEVEL && height.slope(p.x, p.y) <= MAX_PROP_SLOPE
        }
        _ => true,
    };
    let rules = ScatterRules {
        count: PROP_COUNT,
        radius: WORLD_RADIUS,
        min_spacing: PROP_MIN_SPACING,
        keep_clear: &anchors,
        clearance: STATION_CLEARANCE,
        attempts_per_prop: SCATTER_ATTEMPTS_PER_PROP,
        accept: &accept,
    };
    let spots = scatter(&rules, SCATTER_SEED);

    let material = materials.add(StandardMaterial {
        base_color: palette.prop,
        emissive: palette.prop_glow,
        perceptual_roughness: 0.8,
        ..default()
    });
    // Size and motion variation, independent of placement
    let mut rng = StdRng::seed_from_u64(SCATTER_SEED.wrapping_add(1));

    match theme.prop_kind() {
        PropKind::FloatingRock => {
            let mesh = meshes.add(Sphere::new(2.5));
            for (i, spot) in spots.iter().enumerate() {
                let base_y = rng.gen_range(-10.0..45.0);
                let scale = rng.gen_range(0.6..1.8);
                commands.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(spot.x, base_y, spot.y).with_scale(Vec3::splat(scale)),
                    Bob {
                        base_y,
                        amplitude: rng.gen_range(0.8..2.5),
                        speed: rng.gen_range(0.3..0.8),
                        phase: i as f32,
                    },
                ));
            }
        }
        PropKind::Crystal => {
            let mesh = meshes.add(Cuboid::new(1.6, 7.0, 1.6));
            for spot in &spots {
                let scale = rng.gen_range(0.5..1.6);
                let tilt = Quat::from_rotation_z(rng.gen_range(-0.3..0.3));
                commands.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(spot.x, 3.5 * scale, spot.y)
                        .with_rotation(tilt)
                        .with_scale(Vec3::splat(scale)),
                    Spin {
                        speed: rng.gen_range(0.1..0.5),
                    },
                ));
            }
        }
        PropKind::Block => {
            let mesh = meshes.add(Cuboid::new(4.0, 4.0, 4.0));
            for spot in &spots {
                let scale = rng.gen_range(0.6..1.5);
                commands.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(spot.x, 2.0 * scale, spot.y).with_scale(Vec3::splat(scale)),
                ));
            }
        }
        PropKind::Tree => {
            let trunk = meshes.add(Cylinder::new(0.6, 4.0));
            let crown = meshes.add(Cone::new(3.2, 9.0));
            let bark = materials.add(StandardMaterial {
                base_color: Color::srgb(0.36, 0.25, 0.16),
                perceptual_roughness: 1.0,
                ..default()
            });
            for spot in &spots {
                let scale = rng.gen_range(0.7..1.4);
                let ground = height.height(spot.x, spot.y);
                commands
                    .spawn((
                        Transform::from_xyz(spot.x, ground, spot.y).with_scale(Vec3::splat(scale)),
                        Visibility::default(),
                    ))
                    .with_children(|tree| {
                        tree.spawn((
                            Mesh3d(trunk.clone()),
                            MeshMaterial3d(bark.clone()),
                            Transform::from_xyz(0.0, 2.0, 0.0),
                        ));
                        tree.spawn((
                            Mesh3d(crown.clone()),
                            MeshMaterial3d(material.clone()),
                            Transform::from_xyz(0.0, 8.0, 0.0),
                        ));
                    });
            }
        }
    }

    spots.len()
}
