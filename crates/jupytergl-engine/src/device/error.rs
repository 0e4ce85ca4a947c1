use super::ShaderType;

/// Failure while building a shader program.
///
/// `E` is the error type of the [`GlContext`](super::GlContext) in use.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError<E> {
    /// The GL compiler rejected a shader source. `log` is the shader info log.
    #[error("an error occurred compiling the {stage} shader: {log}")]
    Compilation { stage: ShaderType, log: String },

    /// Linking the attached shaders failed. `log` is the program info log.
    #[error("unable to initialize the shader program: {log}")]
    Link { log: String },

    /// The context itself failed (e.g. its transport went away).
    #[error("gl context error: {0}")]
    Context(#[from] E),
}

impl<E> ShaderError<E> {
    /// Diagnostic text reported by the GL, if this is a compile or link failure.
    pub fn log(&self) -> Option<&str> {
        match self {
            ShaderError::Compilation { log, .. } | ShaderError::Link { log } => Some(log),
            ShaderError::Context(_) => None,
        }
    }
}
