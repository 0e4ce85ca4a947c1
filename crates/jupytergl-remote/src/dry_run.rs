//! Scripted executor that answers like a front-end on which every GL call
//! succeeds.
//!
//! Object-creating queries get fresh `key<N>` handles (numbered from 1, as the
//! front-end does), status queries report success, info logs are empty and
//! everything else is `null`.

use std::collections::BTreeMap;

use jupytergl_engine::device::{COMPILE_STATUS, FRAGMENT_SHADER, LINK_STATUS, VERTEX_SHADER};
use serde_json::{json, Value};

use crate::protocol::{Message, QueryErrorData, Reply};

const OBJECT_OPS: &[&str] = &[
    "createBuffer",
    "createFramebuffer",
    "createProgram",
    "createRenderbuffer",
    "createShader",
    "createTexture",
    "getUniformLocation",
];

const STATUS_OPS: &[&str] = &["getShaderParameter", "getProgramParameter"];

const LOG_OPS: &[&str] = &["getShaderInfoLog", "getProgramInfoLog"];

#[derive(Debug, Clone)]
pub struct DryRunExecutor {
    next_key: u64,
}

impl Default for DryRunExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self { next_key: 1 }
    }

    fn fresh_key(&mut self) -> Value {
        let key = format!("key{}", self.next_key);
        self.next_key += 1;
        Value::String(key)
    }

    pub fn reply(&mut self, message: &Message) -> Reply {
        match message {
            Message::Query { instructions } => {
                let Some(last) = instructions.last() else {
                    return Reply::QueryError {
                        data: QueryErrorData { message: "empty query".to_owned() },
                    };
                };
                let op = last.op.as_str();
                let data = if OBJECT_OPS.contains(&op) {
                    self.fresh_key()
                } else if STATUS_OPS.contains(&op) {
                    json!(true)
                } else if LOG_OPS.contains(&op) {
                    json!("")
                } else {
                    Value::Null
                };
                Reply::QueryReply { data }
            }
            Message::GetConstants { target } => {
                let data = BTreeMap::from([
                    ("COMPILE_STATUS".to_owned(), f64::from(COMPILE_STATUS)),
                    ("FRAGMENT_SHADER".to_owned(), f64::from(FRAGMENT_SHADER)),
                    ("LINK_STATUS".to_owned(), f64::from(LINK_STATUS)),
                    ("VERTEX_SHADER".to_owned(), f64::from(VERTEX_SHADER)),
                ]);
                Reply::ConstantsReply { target: target.clone(), data }
            }
            Message::GetMethods { target } => {
                let data = OBJECT_OPS
                    .iter()
                    .chain(STATUS_OPS)
                    .chain(LOG_OPS)
                    .map(|op| (*op).to_owned())
                    .collect();
                Reply::MethodsReply { target: target.clone(), data }
            }
            Message::Exec { .. } | Message::Command { .. } => {
                Reply::QueryReply { data: Value::Null }
            }
        }
    }
}
