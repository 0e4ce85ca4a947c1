use std::collections::BTreeMap;
use std::mem;

use jupytergl_engine::coords::Mat4;
use jupytergl_engine::device::{GlContext, GlEnum, ShaderType};
use serde_json::{json, Value};

use crate::config::RemoteConfig;
use crate::protocol::{
    literal_arg, truthy, BufferKind, Command, Instruction, Message, RemoteHandle, Reply,
};
use crate::transport::Transport;
use crate::RemoteError;

/// [`GlContext`] that forwards calls to a remote executor.
///
/// Exec calls are queued. Outside a chunk they are sent right away as a
/// one-instruction `exec` message; inside a chunk they are held until the
/// outermost chunk ends and then sent as a single `exec` message. A query
/// carries any held exec calls in front of it, so it costs one round trip.
pub struct RemoteContext<T> {
    transport: T,
    config: RemoteConfig,
    pending: Vec<Instruction>,
    buffers: Vec<Vec<u8>>,
    depth: usize,
    constants: BTreeMap<String, f64>,
}

impl<T: Transport> RemoteContext<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, RemoteConfig::default())
    }

    pub fn with_config(transport: T, config: RemoteConfig) -> Self {
        Self {
            transport,
            config,
            pending: Vec::new(),
            buffers: Vec::new(),
            depth: 0,
            constants: BTreeMap::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Queues a call whose result is discarded.
    pub fn exec(&mut self, op: &str, args: Vec<Value>) -> Result<(), RemoteError> {
        if self.config.trace {
            log::debug!("exec {op}");
        }
        self.pending.push(Instruction::exec(op, args));
        if self.depth == 0 {
            self.flush()
        } else {
            Ok(())
        }
    }

    /// Queues a call with one binary argument, referenced in `args` by
    /// `kind.arg()`.
    pub fn exec_with_buffer(
        &mut self,
        op: &str,
        args: Vec<Value>,
        buffer: Vec<u8>,
    ) -> Result<(), RemoteError> {
        self.buffers.push(buffer);
        self.exec(op, args)
    }

    /// Runs a call remotely and returns its value.
    pub fn query(&mut self, op: &str, args: Vec<Value>) -> Result<Value, RemoteError> {
        if self.config.trace {
            log::debug!("query {op}");
        }
        let mut instructions = mem::take(&mut self.pending);
        instructions.push(Instruction::query(op, args));
        let buffers = mem::take(&mut self.buffers);

        match self.transport.request(&Message::Query { instructions }, buffers)? {
            Reply::QueryReply { data } => Ok(data),
            Reply::QueryError { data } => Err(RemoteError::Query { message: data.message }),
            other => Err(unexpected("queryReply", &other)),
        }
    }

    /// Sends queued exec calls, if any.
    pub fn flush(&mut self) -> Result<(), RemoteError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let instructions = mem::take(&mut self.pending);
        let buffers = mem::take(&mut self.buffers);
        log::trace!("flushing {} instruction(s)", instructions.len());
        self.transport.send(&Message::Exec { instructions }, buffers)
    }

    fn trace_message(&self, message: &Message) {
        if self.config.trace {
            log::debug!("{}", message.kind());
        }
    }

    fn query_handle(&mut self, op: &str, args: Vec<Value>) -> Result<RemoteHandle, RemoteError> {
        RemoteHandle::from_value(self.query(op, args)?)
    }

    fn query_status(&mut self, op: &str, args: Vec<Value>) -> Result<bool, RemoteError> {
        truthy(&self.query(op, args)?)
    }

    fn query_text(&mut self, op: &str, args: Vec<Value>) -> Result<String, RemoteError> {
        match self.query(op, args)? {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s),
            other => Err(RemoteError::Protocol(format!("{op} returned {other}, expected text"))),
        }
    }

    // ── discovery ─────────────────────────────────────────────────────────

    /// Fetches the executor's GL constants and caches them.
    pub fn fetch_constants(&mut self) -> Result<&BTreeMap<String, f64>, RemoteError> {
        self.flush()?;
        let message = Message::GetConstants { target: self.config.target.clone() };
        self.trace_message(&message);
        match self.transport.request(&message, Vec::new())? {
            Reply::ConstantsReply { data, .. } => {
                log::debug!("received {} gl constants", data.len());
                self.constants = data;
                Ok(&self.constants)
            }
            other => Err(unexpected("constantsReply", &other)),
        }
    }

    /// Looks up a constant fetched by [`fetch_constants`](Self::fetch_constants).
    pub fn constant(&self, name: &str) -> Option<GlEnum> {
        self.constants.get(name).map(|v| *v as GlEnum)
    }

    /// Lists the GL methods the executor can call.
    pub fn fetch_methods(&mut self) -> Result<Vec<String>, RemoteError> {
        self.flush()?;
        let message = Message::GetMethods { target: self.config.target.clone() };
        self.trace_message(&message);
        match self.transport.request(&message, Vec::new())? {
            Reply::MethodsReply { data, .. } => Ok(data),
            other => Err(unexpected("methodsReply", &other)),
        }
    }

    // ── front-end commands ────────────────────────────────────────────────

    /// Replaces the front-end's orbit camera view. `render` is replayed by the
    /// front-end whenever the camera moves.
    pub fn orbit_view(
        &mut self,
        args: Vec<Value>,
        render: Vec<Instruction>,
    ) -> Result<(), RemoteError> {
        self.flush()?;
        let command = Command { op: "orbitView".to_owned(), args, instructions: render };
        let message = Message::Command { command };
        self.trace_message(&message);
        self.transport.send(&message, Vec::new())
    }

    // ── program state ─────────────────────────────────────────────────────

    pub fn use_program(&mut self, program: &RemoteHandle) -> Result<(), RemoteError> {
        self.exec("useProgram", vec![program.arg()])
    }

    /// Returns `None` when the uniform is not active in `program`.
    pub fn get_uniform_location(
        &mut self,
        program: &RemoteHandle,
        name: &str,
    ) -> Result<Option<RemoteHandle>, RemoteError> {
        match self.query("getUniformLocation", vec![program.arg(), literal_arg(name)?])? {
            Value::Null => Ok(None),
            other => RemoteHandle::from_value(other).map(Some),
        }
    }

    /// Uploads a matrix uniform. [`Mat4`] is already column-major, so
    /// `transpose` is always false.
    pub fn uniform_matrix4fv(
        &mut self,
        location: &RemoteHandle,
        m: &Mat4,
    ) -> Result<(), RemoteError> {
        self.exec_with_buffer(
            "uniformMatrix4fv",
            vec![location.arg(), json!(false), BufferKind::Float32.arg()],
            m.as_bytes().to_vec(),
        )
    }
}

fn unexpected(expected: &'static str, reply: &Reply) -> RemoteError {
    RemoteError::UnexpectedReply { expected, reply: reply.kind().to_owned() }
}

impl<T: Transport> GlContext for RemoteContext<T> {
    type Shader = RemoteHandle;
    type Program = RemoteHandle;
    type Error = RemoteError;

    fn create_shader(&mut self, ty: ShaderType) -> Result<RemoteHandle, RemoteError> {
        self.query_handle("createShader", vec![json!(ty.gl_enum())])
    }

    fn create_program(&mut self) -> Result<RemoteHandle, RemoteError> {
        self.query_handle("createProgram", Vec::new())
    }

    fn shader_source(&mut self, shader: &RemoteHandle, source: &str) -> Result<(), RemoteError> {
        self.exec("shaderSource", vec![shader.arg(), literal_arg(source)?])
    }

    fn compile_shader(&mut self, shader: &RemoteHandle) -> Result<(), RemoteError> {
        self.exec("compileShader", vec![shader.arg()])
    }

    fn attach_shader(
        &mut self,
        program: &RemoteHandle,
        shader: &RemoteHandle,
    ) -> Result<(), RemoteError> {
        self.exec("attachShader", vec![program.arg(), shader.arg()])
    }

    fn link_program(&mut self, program: &RemoteHandle) -> Result<(), RemoteError> {
        self.exec("linkProgram", vec![program.arg()])
    }

    fn get_shader_parameter(
        &mut self,
        shader: &RemoteHandle,
        pname: GlEnum,
    ) -> Result<bool, RemoteError> {
        self.query_status("getShaderParameter", vec![shader.arg(), json!(pname)])
    }

    fn get_program_parameter(
        &mut self,
        program: &RemoteHandle,
        pname: GlEnum,
    ) -> Result<bool, RemoteError> {
        self.query_status("getProgramParameter", vec![program.arg(), json!(pname)])
    }

    fn get_shader_info_log(&mut self, shader: &RemoteHandle) -> Result<String, RemoteError> {
        self.query_text("getShaderInfoLog", vec![shader.arg()])
    }

    fn get_program_info_log(&mut self, program: &RemoteHandle) -> Result<String, RemoteError> {
        self.query_text("getProgramInfoLog", vec![program.arg()])
    }

    fn delete_shader(&mut self, shader: RemoteHandle) -> Result<(), RemoteError> {
        self.exec("deleteShader", vec![shader.arg()])
    }

    fn begin_chunk(&mut self) {
        self.depth += 1;
    }

    fn end_chunk(&mut self) -> Result<(), RemoteError> {
        match self.depth {
            0 => {
                log::warn!("end_chunk without matching begin_chunk");
                self.flush()
            }
            1 => {
                self.depth = 0;
                self.flush()
            }
            _ => {
                self.depth -= 1;
                Ok(())
            }
        }
    }
}
