//! Per-instance transforms handed to the renderer.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, Euler rotation (XYZ, radians) and uniform scale of one instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleTransform {
    /// World-space position.
    pub position: Vec3,
    /// Euler angles applied in XYZ order.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

impl ParticleTransform {
    /// Rotation as a quaternion.
    #[must_use]
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Model matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation_quat(),
            self.position,
        )
    }

    /// GPU-ready form.
    #[must_use]
    pub fn to_instance(&self) -> InstanceRaw {
        InstanceRaw {
            model: self.model_matrix().to_cols_array_2d(),
        }
    }
}

/// Per-instance data for batched rendering: a column-major model matrix.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    /// Model matrix (4x4 = 16 floats, column-major).
    pub model: [[f32; 4]; 4],
}

impl InstanceRaw {
    /// Raw bytes of a slice of instances, ready for a vertex buffer upload.
    #[must_use]
    pub fn as_bytes(instances: &[Self]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }

    /// Translation column of the model matrix.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        let [x, y, z, _] = self.model[3];
        Vec3::new(x, y, z)
    }
}
