//! In-memory GL context double for unit tests.
//!
//! Compiles any source containing `void main`, links programs that have one
//! compiled shader per stage attached, and records every call by name.

use super::{GlContext, GlEnum, ShaderType, COMPILE_STATUS, LINK_STATUS};

#[derive(Debug, thiserror::Error)]
#[error("fake context refused `{0}`")]
pub(crate) struct FakeError(pub &'static str);

#[derive(Debug, Default)]
pub(crate) struct FakeShader {
    pub ty: Option<ShaderType>,
    pub source: String,
    pub compiled: bool,
    pub deleted: usize,
}

#[derive(Debug, Default)]
pub(crate) struct FakeProgram {
    pub attached: Vec<usize>,
    pub linked: bool,
}

#[derive(Debug, Default)]
pub(crate) struct FakeContext {
    pub shaders: Vec<FakeShader>,
    pub programs: Vec<FakeProgram>,
    pub calls: Vec<&'static str>,
    pub depth: usize,
    pub flushes: usize,
    /// Op name that returns `FakeError` instead of running.
    pub fail_on: Option<&'static str>,
    /// Forces link failure with this log.
    pub link_log: Option<String>,
}

impl FakeContext {
    fn call(&mut self, op: &'static str) -> Result<(), FakeError> {
        self.calls.push(op);
        if self.fail_on == Some(op) {
            return Err(FakeError(op));
        }
        Ok(())
    }

    pub fn count(&self, op: &str) -> usize {
        self.calls.iter().filter(|c| **c == op).count()
    }
}

impl GlContext for FakeContext {
    type Shader = usize;
    type Program = usize;
    type Error = FakeError;

    fn create_shader(&mut self, ty: ShaderType) -> Result<usize, FakeError> {
        self.call("createShader")?;
        self.shaders.push(FakeShader { ty: Some(ty), ..Default::default() });
        Ok(self.shaders.len() - 1)
    }

    fn create_program(&mut self) -> Result<usize, FakeError> {
        self.call("createProgram")?;
        self.programs.push(FakeProgram::default());
        Ok(self.programs.len() - 1)
    }

    fn shader_source(&mut self, shader: &usize, source: &str) -> Result<(), FakeError> {
        self.call("shaderSource")?;
        self.shaders[*shader].source = source.to_owned();
        Ok(())
    }

    fn compile_shader(&mut self, shader: &usize) -> Result<(), FakeError> {
        self.call("compileShader")?;
        let s = &mut self.shaders[*shader];
        s.compiled = s.source.contains("void main");
        Ok(())
    }

    fn attach_shader(&mut self, program: &usize, shader: &usize) -> Result<(), FakeError> {
        self.call("attachShader")?;
        self.programs[*program].attached.push(*shader);
        Ok(())
    }

    fn link_program(&mut self, program: &usize) -> Result<(), FakeError> {
        self.call("linkProgram")?;
        let stages: Vec<_> = self.programs[*program]
            .attached
            .iter()
            .map(|s| &self.shaders[*s])
            .filter(|s| s.compiled)
            .filter_map(|s| s.ty)
            .collect();
        let linked = self.link_log.is_none()
            && stages.contains(&ShaderType::Vertex)
            && stages.contains(&ShaderType::Fragment);
        self.programs[*program].linked = linked;
        Ok(())
    }

    fn get_shader_parameter(&mut self, shader: &usize, pname: GlEnum) -> Result<bool, FakeError> {
        self.call("getShaderParameter")?;
        Ok(pname == COMPILE_STATUS && self.shaders[*shader].compiled)
    }

    fn get_program_parameter(&mut self, program: &usize, pname: GlEnum) -> Result<bool, FakeError> {
        self.call("getProgramParameter")?;
        Ok(pname == LINK_STATUS && self.programs[*program].linked)
    }

    fn get_shader_info_log(&mut self, shader: &usize) -> Result<String, FakeError> {
        self.call("getShaderInfoLog")?;
        let s = &self.shaders[*shader];
        Ok(if s.compiled {
            String::new()
        } else {
            "ERROR: 0:1: syntax error".to_owned()
        })
    }

    fn get_program_info_log(&mut self, program: &usize) -> Result<String, FakeError> {
        self.call("getProgramInfoLog")?;
        if self.programs[*program].linked {
            return Ok(String::new());
        }
        Ok(self
            .link_log
            .clone()
            .unwrap_or_else(|| "missing shader stage".to_owned()))
    }

    fn delete_shader(&mut self, shader: usize) -> Result<(), FakeError> {
        self.call("deleteShader")?;
        self.shaders[shader].deleted += 1;
        Ok(())
    }

    fn begin_chunk(&mut self) {
        self.calls.push("beginChunk");
        self.depth += 1;
    }

    fn end_chunk(&mut self) -> Result<(), FakeError> {
        self.call("endChunk")?;
        self.depth -= 1;
        if self.depth == 0 {
            self.flushes += 1;
        }
        Ok(())
    }
}
