//! GLU-style helpers.
//!
//! - [`matrix`]: identity, translation, look-at and projection builders
//! - [`shader`]: shader compilation and program linking over a [`GlContext`]
//!
//! All matrices come back in [`Mat4`]'s column-major layout, ready to upload
//! without transposing.
//!
//! [`GlContext`]: crate::device::GlContext
//! [`Mat4`]: crate::coords::Mat4

pub mod matrix;
pub mod shader;

pub use matrix::{
    load_identity, make_frustum, make_look_at, make_ortho, make_perspective, normalize, translate,
};
pub use shader::{make_program, make_shader, LinkedProgram};
