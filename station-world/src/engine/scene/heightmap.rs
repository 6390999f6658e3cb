/// Summed sine octaves used as ground elevation for the terrain world
use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Octave {
    frequency: f32,
    amplitude: f32,
    phase: Vec2,
}

/// Ground elevation as a pure function of (x, z).
#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct HeightField {
    octaves: Vec<Octave>,
}

impl HeightField {
    /// Level ground at y = 0.
    pub fn flat() -> Self {
        Self::default()
    }

    /// Low rolling hills with a few finer ripples on top.
    pub fn rolling() -> Self {
        Self {
            octaves: vec![
                Octave {
                    frequency: 0.012,
                    amplitude: 14.0,
                    phase: Vec2::new(0.3, 1.7),
                },
                Octave {
                    frequency: 0.031,
                    amplitude: 5.0,
                    phase: Vec2::new(2.1, 0.4),
                },
                Octave {
                    frequency: 0.077,
                    amplitude: 1.6,
                    phase: Vec2::new(4.2, 3.3),
                },
                Octave {
                    frequency: 0.19,
                    amplitude: 0.4,
                    phase: Vec2::new(1.1, 5.8),
                },
            ],
        }
    }

    pub fn is_flat(&self) -> bool {
        self.octaves.is_empty()
    }

    pub fn height(&self, x: f32, z: f32) -> f32 {
        self.octaves
            .iter()
            .map(|o| {
                o.amplitude * (x * o.frequency + o.phase.x).sin() * (z * o.frequency + o.phase.y).cos()
            })
            .sum()
    }

    /// Gradient magnitude from central differences.
    pub fn slope(&self, x: f32, z: f32) -> f32 {
        const STEP: f32 = 0.5;
        let dx = (self.height(x + STEP, z) - self.height(x - STEP, z)) / (2.0 * STEP);
        let dz = (self.height(x, z + STEP) - self.height(x, z - STEP)) / (2.0 * STEP);
        Vec2::new(dx, dz).length()
    }

    /// Subdivided square ground mesh centred on the origin with vertices lifted to the field.
    pub fn mesh(&self, size: f32, subdivisions: u32) -> Mesh {
        let mut mesh = Plane3d::default()
            .mesh()
            .size(size, size)
            .subdivisions(subdivisions)
            .build();

        if let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
        {
            for position in positions.iter_mut() {
                position[1] = self.height(position[0], position[2]);
            }
        }
        mesh.compute_normals();
        mesh
    }
}
