//! GL context capability.
//!
//! This module defines the seam between the builders in [`crate::glu`] and
//! whatever GL binding the host provides:
//! - [`GlContext`]: the calls the builders need, with context-owned handles
//! - [`Chunk`]: scoped batch guard around `begin_chunk` / `end_chunk`
//! - [`ShaderError`]: compile/link failures and context failures

mod chunk;
mod context;
mod error;

pub use chunk::Chunk;
pub use context::{
    GlContext, GlEnum, ShaderType, COMPILE_STATUS, FRAGMENT_SHADER, LINK_STATUS, VERTEX_SHADER,
};
pub use error::ShaderError;

#[cfg(test)]
pub(crate) mod fake;
