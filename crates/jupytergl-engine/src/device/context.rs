use core::fmt;

/// GL enum value as exposed by WebGL / OpenGL ES.
pub type GlEnum = u32;

pub const FRAGMENT_SHADER: GlEnum = 0x8B30;
pub const VERTEX_SHADER: GlEnum = 0x8B31;
pub const COMPILE_STATUS: GlEnum = 0x8B81;
pub const LINK_STATUS: GlEnum = 0x8B82;

/// Programmable pipeline stage of a shader object.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderType {
    Vertex,
    Fragment,
}

impl ShaderType {
    #[inline]
    pub const fn gl_enum(self) -> GlEnum {
        match self {
            ShaderType::Vertex => VERTEX_SHADER,
            ShaderType::Fragment => FRAGMENT_SHADER,
        }
    }

    pub const fn from_gl_enum(value: GlEnum) -> Option<Self> {
        match value {
            VERTEX_SHADER => Some(ShaderType::Vertex),
            FRAGMENT_SHADER => Some(ShaderType::Fragment),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderType::Vertex => "vertex",
            ShaderType::Fragment => "fragment",
        })
    }
}

/// GL calls needed to build a shader program.
///
/// Handles are owned by the context; this crate only asks for them to be
/// created or deleted. Every call is fallible so that implementations backed
/// by a transport can report failures; in-process bindings may use
/// [`core::convert::Infallible`].
///
/// Implementations are used from the thread that owns the GL context.
pub trait GlContext {
    type Shader: Clone + fmt::Debug;
    type Program: Clone + fmt::Debug;
    type Error: std::error::Error + Send + Sync + 'static;

    fn create_shader(&mut self, ty: ShaderType) -> Result<Self::Shader, Self::Error>;
    fn create_program(&mut self) -> Result<Self::Program, Self::Error>;

    fn shader_source(&mut self, shader: &Self::Shader, source: &str) -> Result<(), Self::Error>;
    fn compile_shader(&mut self, shader: &Self::Shader) -> Result<(), Self::Error>;

    fn attach_shader(
        &mut self,
        program: &Self::Program,
        shader: &Self::Shader,
    ) -> Result<(), Self::Error>;
    fn link_program(&mut self, program: &Self::Program) -> Result<(), Self::Error>;

    /// Boolean status query, e.g. [`COMPILE_STATUS`].
    fn get_shader_parameter(
        &mut self,
        shader: &Self::Shader,
        pname: GlEnum,
    ) -> Result<bool, Self::Error>;

    /// Boolean status query, e.g. [`LINK_STATUS`].
    fn get_program_parameter(
        &mut self,
        program: &Self::Program,
        pname: GlEnum,
    ) -> Result<bool, Self::Error>;

    fn get_shader_info_log(&mut self, shader: &Self::Shader) -> Result<String, Self::Error>;
    fn get_program_info_log(&mut self, program: &Self::Program) -> Result<String, Self::Error>;

    fn delete_shader(&mut self, shader: Self::Shader) -> Result<(), Self::Error>;

    /// Opens a batch. Calls up to the matching [`end_chunk`](Self::end_chunk)
    /// form one flush unit. Batches may nest.
    ///
    /// Prefer [`Chunk::begin`](super::Chunk::begin), which guarantees the
    /// matching `end_chunk`.
    fn begin_chunk(&mut self);

    /// Closes the innermost batch; closing the outermost one flushes it.
    fn end_chunk(&mut self) -> Result<(), Self::Error>;
}
