//! Value types for 3D transforms.
//!
//! Conventions:
//! - right-handed world space, camera looks down -Z (GL conventions)
//! - all components are `f32`, matching what gets uploaded to the GPU
//! - [`Mat4`] is stored in GL column-major order; see its docs for indexing

mod mat4;
mod vec3;

pub use mat4::Mat4;
pub use vec3::Vec3;
