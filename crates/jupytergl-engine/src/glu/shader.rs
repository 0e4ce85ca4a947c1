//! Shader compilation and program linking.
//!
//! Each call is independent and keeps no state between calls. Source upload +
//! compile, and attach + link, are each issued as one [`Chunk`].

use core::fmt;

use crate::device::{Chunk, GlContext, ShaderError, ShaderType, COMPILE_STATUS, LINK_STATUS};

/// A linked program together with the shader objects linked into it.
///
/// [`make_program`] never deletes the shaders it creates. Deleting them is the
/// caller's job, either through [`LinkedProgram::delete_shaders`] or by keeping
/// the handles around for re-linking.
pub struct LinkedProgram<C: GlContext + ?Sized> {
    pub program: C::Program,
    pub vertex: C::Shader,
    pub fragment: C::Shader,
}

impl<C: GlContext + ?Sized> LinkedProgram<C> {
    /// Deletes both shader objects and returns the program handle.
    ///
    /// The shaders stay alive in the GL while attached; they are freed once
    /// the program is deleted or they are detached.
    pub fn delete_shaders(self, ctx: &mut C) -> Result<C::Program, C::Error> {
        ctx.delete_shader(self.vertex)?;
        ctx.delete_shader(self.fragment)?;
        Ok(self.program)
    }
}

impl<C: GlContext + ?Sized> Clone for LinkedProgram<C> {
    fn clone(&self) -> Self {
        Self {
            program: self.program.clone(),
            vertex: self.vertex.clone(),
            fragment: self.fragment.clone(),
        }
    }
}

impl<C: GlContext + ?Sized> fmt::Debug for LinkedProgram<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedProgram")
            .field("program", &self.program)
            .field("vertex", &self.vertex)
            .field("fragment", &self.fragment)
            .finish()
    }
}

/// Creates and compiles a shader of type `ty` from `source`.
///
/// On a compile failure the shader object is deleted and the error carries
/// the shader info log. The shader is also deleted when reading the log fails.
pub fn make_shader<C: GlContext + ?Sized>(
    ctx: &mut C,
    source: &str,
    ty: ShaderType,
) -> Result<C::Shader, ShaderError<C::Error>> {
    let shader = ctx.create_shader(ty)?;

    let mut chunk = Chunk::begin(&mut *ctx);
    chunk.shader_source(&shader, source)?;
    chunk.compile_shader(&shader)?;
    chunk.finish()?;

    if !ctx.get_shader_parameter(&shader, COMPILE_STATUS)? {
        let log = match ctx.get_shader_info_log(&shader) {
            Ok(log) => log,
            Err(err) => {
                if let Err(del) = ctx.delete_shader(shader) {
                    log::warn!("failed to delete rejected {ty} shader: {del}");
                }
                return Err(err.into());
            }
        };
        ctx.delete_shader(shader)?;
        log::warn!("{ty} shader failed to compile: {log}");
        return Err(ShaderError::Compilation { stage: ty, log });
    }

    log::debug!("compiled {ty} shader {shader:?}");
    Ok(shader)
}

/// Compiles both stages and links them into a new program.
///
/// The program object is created first. A compile error in either stage is
/// returned before anything is attached or linked. Neither the program nor
/// already compiled shaders are deleted on failure.
pub fn make_program<C: GlContext + ?Sized>(
    ctx: &mut C,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<LinkedProgram<C>, ShaderError<C::Error>> {
    let program = ctx.create_program()?;
    let vertex = make_shader(ctx, vertex_source, ShaderType::Vertex)?;
    let fragment = make_shader(ctx, fragment_source, ShaderType::Fragment)?;

    let mut chunk = Chunk::begin(&mut *ctx);
    chunk.attach_shader(&program, &vertex)?;
    chunk.attach_shader(&program, &fragment)?;
    chunk.link_program(&program)?;
    chunk.finish()?;

    if !ctx.get_program_parameter(&program, LINK_STATUS)? {
        let log = ctx.get_program_info_log(&program)?;
        log::warn!("program {program:?} failed to link: {log}");
        return Err(ShaderError::Link { log });
    }

    log::debug!("linked program {program:?}");
    Ok(LinkedProgram { program, vertex, fragment })
}
