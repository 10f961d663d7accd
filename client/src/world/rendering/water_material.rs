//! 2D material for the triangles of the draw list.
//!
//! The colour comes from the mesh's vertex colours through the default 2D mesh
//! shaders. The material only picks the blend state, so the reverse-subtract
//! water body and the ordinary alpha-blended geometry share one pipeline
//! definition specialized per [`BlendMode`].

use bevy::{
    prelude::*,
    render::{
        mesh::MeshVertexBufferLayoutRef,
        render_resource::{
            AsBindGroup, BlendComponent, BlendFactor as GpuBlendFactor, BlendOperation,
            BlendState, RenderPipelineDescriptor, SpecializedMeshPipelineError,
        },
    },
    sprite::{AlphaMode2d, Material2d, Material2dKey},
};

use super::canvas::{BlendEquation, BlendFactor, BlendMode};

#[derive(Asset, AsBindGroup, TypePath, Debug, Clone)]
#[bind_group_data(WaterBlendKey)]
pub struct WaterBlendMaterial {
    pub blend: BlendMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaterBlendKey {
    blend: BlendMode,
}

impl From<&WaterBlendMaterial> for WaterBlendKey {
    fn from(material: &WaterBlendMaterial) -> Self {
        Self {
            blend: material.blend,
        }
    }
}

fn gpu_factor(factor: BlendFactor) -> GpuBlendFactor {
    match factor {
        BlendFactor::One => GpuBlendFactor::One,
        BlendFactor::SrcAlpha => GpuBlendFactor::SrcAlpha,
        BlendFactor::OneMinusSrcAlpha => GpuBlendFactor::OneMinusSrcAlpha,
    }
}

pub fn blend_state(mode: BlendMode) -> BlendState {
    let operation = match mode.equation {
        BlendEquation::Add => BlendOperation::Add,
        BlendEquation::ReverseSubtract => BlendOperation::ReverseSubtract,
    };

    BlendState {
        color: BlendComponent {
            src_factor: gpu_factor(mode.src),
            dst_factor: gpu_factor(mode.dst),
            operation,
        },
        alpha: BlendComponent::OVER,
    }
}

impl Material2d for WaterBlendMaterial {
    fn alpha_mode(&self) -> AlphaMode2d {
        AlphaMode2d::Blend
    }

    fn specialize(
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        key: Material2dKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        if let Some(fragment) = &mut descriptor.fragment {
            for target_state in fragment.targets.iter_mut().flatten() {
                target_state.blend = Some(blend_state(key.bind_group_data.blend));
            }
        }
        Ok(())
    }
}

/// One shared material per blend mode.
#[derive(Resource)]
pub struct WaterBlendMaterials {
    pub alpha: Handle<WaterBlendMaterial>,
    pub subtract: Handle<WaterBlendMaterial>,
}

impl WaterBlendMaterials {
    pub fn get(&self, mode: BlendMode) -> Handle<WaterBlendMaterial> {
        if mode.equation == BlendEquation::ReverseSubtract {
            self.subtract.clone()
        } else {
            self.alpha.clone()
        }
    }
}

pub fn setup_water_materials(
    mut commands: Commands,
    mut materials: ResMut<Assets<WaterBlendMaterial>>,
) {
    commands.insert_resource(WaterBlendMaterials {
        alpha: materials.add(WaterBlendMaterial {
            blend: BlendMode::ALPHA,
        }),
        subtract: materials.add(WaterBlendMaterial {
            blend: BlendMode::SUBTRACT,
        }),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_mode_maps_to_reverse_subtract() {
        let state = blend_state(BlendMode::SUBTRACT);
        assert_eq!(state.color.operation, BlendOperation::ReverseSubtract);
        assert_eq!(state.color.src_factor, GpuBlendFactor::One);
        assert_eq!(state.color.dst_factor, GpuBlendFactor::One);
    }

    #[test]
    fn alpha_mode_matches_standard_blending() {
        assert_eq!(
            blend_state(BlendMode::ALPHA).color,
            BlendState::ALPHA_BLENDING.color
        );
    }
}
