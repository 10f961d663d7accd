//! Replays the recorded draw list with Bevy meshes and gizmos.
//!
//! Triangle strips become one `Mesh2d` each, shaded by vertex colour and
//! blended through [`WaterBlendMaterial`]. Lines go through the
//! [`WaterlineGizmos`] group. Level coordinates grow downward, so every vertex
//! is flipped on its way into world space.

use bevy::{
    prelude::*,
    render::mesh::{Indices, Mesh, PrimitiveTopology},
};

use super::canvas::{DrawCommand, Primitive, Vertex};
use super::water_material::WaterBlendMaterials;

/// Spacing between successive commands of one layer, keeps their draw order.
const COMMAND_Z_STEP: f32 = 0.001;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct WaterlineGizmos;

/// Marker for entities spawned from the previous frame's draw list.
#[derive(Component)]
pub struct DrawListMesh;

/// Draw commands recorded for the current frame.
#[derive(Resource, Default, Debug)]
pub struct FrameDrawList {
    pub commands: Vec<DrawCommand>,
}

#[inline]
pub fn to_world(p: Vec2) -> Vec2 {
    Vec2::new(p.x, -p.y)
}

/// Generated mesh data ready for GPU upload.
#[derive(Debug, Default, Clone)]
pub struct StripMeshData {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

impl StripMeshData {
    /// Unrolls a triangle strip into a triangle list.
    pub fn from_strip(vertices: &[Vertex]) -> Self {
        let mut data = Self::default();
        for vertex in vertices {
            let p = to_world(vertex.position);
            data.positions.push([p.x, p.y, 0.0]);
            let color = LinearRgba::from(vertex.color);
            data.colors
                .push([color.red, color.green, color.blue, color.alpha]);
        }

        for i in 0..vertices.len().saturating_sub(2) as u32 {
            if i % 2 == 0 {
                data.indices.extend_from_slice(&[i, i + 1, i + 2]);
            } else {
                data.indices.extend_from_slice(&[i + 1, i, i + 2]);
            }
        }

        data
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn into_mesh(self) -> Option<Mesh> {
        if self.is_empty() {
            return None;
        }

        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, Default::default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors);
        mesh.insert_indices(Indices::U32(self.indices));
        Some(mesh)
    }
}

pub fn replay_draw_list_system(
    mut commands: Commands,
    frame: Res<FrameDrawList>,
    previous: Query<Entity, With<DrawListMesh>>,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Option<Res<WaterBlendMaterials>>,
    mut gizmos: Gizmos<WaterlineGizmos>,
) {
    let Some(materials) = materials else {
        return;
    };

    for entity in previous.iter() {
        commands.entity(entity).despawn();
    }

    for (index, command) in frame.commands.iter().enumerate() {
        match command.primitive {
            Primitive::TriangleStrip => {
                let Some(mesh) = StripMeshData::from_strip(&command.vertices).into_mesh() else {
                    continue;
                };
                let z = command.layer as f32 + index as f32 * COMMAND_Z_STEP;
                commands.spawn((
                    DrawListMesh,
                    Mesh2d(meshes.add(mesh)),
                    MeshMaterial2d(materials.get(command.state.blend)),
                    Transform::from_xyz(0.0, 0.0, z),
                ));
            }
            Primitive::LineStrip => {
                gizmos.linestrip_gradient_2d(
                    command
                        .vertices
                        .iter()
                        .map(|v| (to_world(v.position), Color::from(v.color))),
                );
            }
            Primitive::Lines => {
                for pair in command.vertices.chunks_exact(2) {
                    gizmos.line_gradient_2d(
                        to_world(pair[0].position),
                        to_world(pair[1].position),
                        Color::from(pair[0].color),
                        Color::from(pair[1].color),
                    );
                }
            }
        }
    }
}

/// Gizmo groups share one width per frame, the widest line wins.
pub fn sync_waterline_width_system(
    frame: Res<FrameDrawList>,
    mut config_store: ResMut<GizmoConfigStore>,
) {
    let width = frame
        .commands
        .iter()
        .filter(|command| command.primitive != Primitive::TriangleStrip)
        .map(|command| command.state.line_width)
        .reduce(f32::max);

    if let Some(width) = width {
        let (config, _) = config_store.config_mut::<WaterlineGizmos>();
        config.line.width = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(n: usize) -> Vec<Vertex> {
        (0..n)
            .map(|i| Vertex::new(i as f32, 10.0, Srgba::WHITE))
            .collect()
    }

    #[test]
    fn strip_unrolls_with_alternating_winding() {
        let data = StripMeshData::from_strip(&strip(5));
        assert_eq!(data.indices, vec![0, 1, 2, 2, 1, 3, 2, 3, 4]);
        assert_eq!(data.positions[3], [3.0, -10.0, 0.0]);
        assert_eq!(data.colors[0], [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn degenerate_strips_build_no_mesh() {
        assert!(StripMeshData::from_strip(&strip(2)).into_mesh().is_none());
        assert!(StripMeshData::from_strip(&strip(3)).into_mesh().is_some());
    }
}
