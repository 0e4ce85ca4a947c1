//! Wire format shared with the WebGL executor.
//!
//! Messages are JSON objects tagged by `type`. Binary payloads travel next to
//! the JSON as an ordered list of buffers.
//!
//! Argument conventions, applied by the executor to every string argument:
//! - `key<N>` refers to a remote variable previously returned by a query
//! - `buffer<kind>` consumes the next attached buffer, viewed as `kind`
//!
//! Any other value is passed to the GL call as-is.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::RemoteError;

const KEY_PREFIX: &str = "key";
const BUFFER_PREFIX: &str = "buffer";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionKind {
    Exec,
    Query,
}

/// One GL call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    #[serde(rename = "type")]
    pub kind: InstructionKind,
    pub op: String,
    pub args: Vec<Value>,
}

impl Instruction {
    pub fn exec(op: impl Into<String>, args: Vec<Value>) -> Self {
        Self { kind: InstructionKind::Exec, op: op.into(), args }
    }

    pub fn query(op: impl Into<String>, args: Vec<Value>) -> Self {
        Self { kind: InstructionKind::Query, op: op.into(), args }
    }
}

/// Front-end command outside the GL call stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub op: String,
    pub args: Vec<Value>,
    /// Instructions the command replays, e.g. the render pass of a view.
    pub instructions: Vec<Instruction>,
}

/// Kernel → front-end message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Message {
    /// Runs every instruction, no reply.
    Exec { instructions: Vec<Instruction> },
    /// Runs all but the last instruction, then replies with the last one's value.
    Query { instructions: Vec<Instruction> },
    GetConstants { target: String },
    GetMethods { target: String },
    Command { command: Command },
}

impl Message {
    /// Value of the `type` tag on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Exec { .. } => "exec",
            Message::Query { .. } => "query",
            Message::GetConstants { .. } => "getConstants",
            Message::GetMethods { .. } => "getMethods",
            Message::Command { .. } => "command",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryErrorData {
    pub message: String,
}

/// Front-end → kernel reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Reply {
    /// Primitive result, or a `key<N>` string for object results.
    QueryReply { data: Value },
    QueryError { data: QueryErrorData },
    ConstantsReply { target: String, data: BTreeMap<String, f64> },
    MethodsReply { target: String, data: Vec<String> },
}

impl Reply {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Reply::QueryReply { .. } => "queryReply",
            Reply::QueryError { .. } => "queryError",
            Reply::ConstantsReply { .. } => "constantsReply",
            Reply::MethodsReply { .. } => "methodsReply",
        }
    }
}

/// Element type of a binary argument.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferKind {
    Uint8,
    Int8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl BufferKind {
    pub const fn name(self) -> &'static str {
        match self {
            BufferKind::Uint8 => "uint8",
            BufferKind::Int8 => "int8",
            BufferKind::Uint8Clamped => "uint8C",
            BufferKind::Int16 => "int16",
            BufferKind::Uint16 => "uint16",
            BufferKind::Int32 => "int32",
            BufferKind::Uint32 => "uint32",
            BufferKind::Float32 => "float32",
            BufferKind::Float64 => "float64",
        }
    }

    /// Placeholder argument that makes the executor consume the next buffer.
    pub fn arg(self) -> Value {
        Value::String(format!("{BUFFER_PREFIX}{}", self.name()))
    }
}

/// Handle to an object living in the executor (shader, program, location…).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct RemoteHandle(String);

impl RemoteHandle {
    /// Parses a query result. Object results come back as `key<N>` strings.
    pub fn from_value(value: Value) -> Result<Self, RemoteError> {
        match value {
            Value::String(s) if s.starts_with(KEY_PREFIX) => Ok(RemoteHandle(s)),
            other => Err(RemoteError::Protocol(format!(
                "expected a remote variable key, got {other}"
            ))),
        }
    }

    pub fn key(&self) -> &str {
        &self.0
    }

    pub fn arg(&self) -> Value {
        Value::String(self.0.clone())
    }
}

/// String argument passed through literally.
///
/// Fails for strings the executor would rewrite (`key…` / `buffer…`).
pub fn literal_arg(s: &str) -> Result<Value, RemoteError> {
    if s.starts_with(KEY_PREFIX) || s.starts_with(BUFFER_PREFIX) {
        return Err(RemoteError::Protocol(format!(
            "string argument {s:?} collides with the executor's reference syntax"
        )));
    }
    Ok(Value::String(s.to_owned()))
}

/// JavaScript-style truthiness of a status query result.
pub fn truthy(value: &Value) -> Result<bool, RemoteError> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => Ok(!s.is_empty()),
        other => Err(RemoteError::Protocol(format!("expected a status value, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    // ── wire shapes ───────────────────────────────────────────────────────

    #[test]
    fn exec_message_shape() {
        let msg = Message::Exec {
            instructions: vec![Instruction::exec("compileShader", vec![json!("key3")])],
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "type": "exec",
                "instructions": [{"type": "exec", "op": "compileShader", "args": ["key3"]}]
            })
        );
    }

    #[test]
    fn discovery_and_command_shapes() {
        let msg = Message::GetConstants { target: "context".into() };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"type": "getConstants", "target": "context"})
        );

        let msg = Message::Command {
            command: Command { op: "orbitView".into(), args: vec![json!(1)], instructions: vec![] },
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "type": "command",
                "command": {"op": "orbitView", "args": [1], "instructions": []}
            })
        );
    }

    #[test]
    fn replies_parse_from_front_end_json() {
        let r: Reply =
            serde_json::from_value(json!({"type": "queryReply", "data": "key7"})).unwrap();
        assert_eq!(r, Reply::QueryReply { data: json!("key7") });

        let r: Reply = serde_json::from_value(json!({
            "type": "queryError",
            "data": {"message": "gl.fooBar is not a function"}
        }))
        .unwrap();
        assert_eq!(r.kind(), "queryError");

        let r: Reply = serde_json::from_value(json!({
            "type": "constantsReply",
            "target": "context",
            "data": {"VERTEX_SHADER": 35633}
        }))
        .unwrap();
        match r {
            Reply::ConstantsReply { data, .. } => assert_eq!(data["VERTEX_SHADER"], 35633.0),
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn message_kind_matches_type_tag() {
        let messages = [
            Message::Exec { instructions: vec![] },
            Message::Query { instructions: vec![] },
            Message::GetConstants { target: "context".into() },
            Message::GetMethods { target: "context".into() },
            Message::Command {
                command: Command { op: "orbitView".into(), args: vec![], instructions: vec![] },
            },
        ];
        for msg in messages {
            assert_eq!(serde_json::to_value(&msg).unwrap()["type"], json!(msg.kind()));
        }
    }

    // ── argument conventions ──────────────────────────────────────────────

    #[test]
    fn buffer_markers() {
        assert_eq!(BufferKind::Float32.arg(), json!("bufferfloat32"));
        assert_eq!(BufferKind::Uint8Clamped.arg(), json!("bufferuint8C"));
    }

    #[test]
    fn handles_require_key_strings() {
        assert_eq!(RemoteHandle::from_value(json!("key12")).unwrap().key(), "key12");
        assert!(RemoteHandle::from_value(json!(12)).is_err());
        assert!(RemoteHandle::from_value(json!(null)).is_err());
        assert!(RemoteHandle::from_value(json!("program")).is_err());
    }

    #[test]
    fn literal_args_reject_reference_syntax() {
        assert_eq!(literal_arg("void main() {}").unwrap(), json!("void main() {}"));
        assert!(literal_arg("keyframe").is_err());
        assert!(literal_arg("bufferfloat32").is_err());
    }

    #[test]
    fn truthiness() {
        assert!(truthy(&json!(true)).unwrap());
        assert!(truthy(&json!(1)).unwrap());
        assert!(!truthy(&json!(0)).unwrap());
        assert!(!truthy(&json!(null)).unwrap());
        assert!(!truthy(&json!("")).unwrap());
        assert!(truthy(&json!([1])).is_err());
    }
}
