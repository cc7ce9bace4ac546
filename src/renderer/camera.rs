//! Model → world → camera → projection

use glam::{Mat4, Vec3};

/// Vertical field of view
pub const FOV_Y: f32 = std::f32::consts::FRAC_PI_2;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

/// A camera placed by its camera-to-world matrix
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub camera_to_world: Mat4,
    pub aspect: f32,
}

impl Camera {
    /// Camera on the +z axis looking down -z at the origin
    pub fn at_distance(z: f32, aspect: f32) -> Self {
        Self {
            camera_to_world: Mat4::from_translation(Vec3::new(0.0, 0.0, z)),
            aspect,
        }
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn project(&self, model_to_world: Mat4) -> Mat4 {
        build_projection_matrix(model_to_world, self.camera_to_world, self.aspect)
    }
}

/// Full model-to-projection matrix for one draw.
///
/// Clip space follows wgpu: x and y in [-1, 1], depth in [0, 1].
pub fn build_projection_matrix(model_to_world: Mat4, camera_to_world: Mat4, aspect: f32) -> Mat4 {
    let world_to_camera = camera_to_world.inverse();
    let camera_to_projection = Mat4::perspective_rh(FOV_Y, aspect.max(f32::EPSILON), Z_NEAR, Z_FAR);
    camera_to_projection * world_to_camera * model_to_world
}
