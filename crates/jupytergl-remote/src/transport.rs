//! Message transports.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::dry_run::DryRunExecutor;
use crate::protocol::{Message, Reply};
use crate::RemoteError;

/// Channel to the executor.
///
/// `buffers` are the binary payloads referenced by `buffer<kind>` arguments,
/// in the order the executor consumes them.
pub trait Transport {
    /// Sends a message that expects no reply.
    fn send(&mut self, message: &Message, buffers: Vec<Vec<u8>>) -> Result<(), RemoteError>;

    /// Sends a message and blocks for its reply.
    fn request(&mut self, message: &Message, buffers: Vec<Vec<u8>>) -> Result<Reply, RemoteError>;
}

/// A message as it left the context.
#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub message: Message,
    pub buffers: Vec<Vec<u8>>,
}

type Responder = Box<dyn FnMut(&Message) -> Reply>;

/// In-memory transport that keeps every message and answers requests with a
/// caller-supplied closure.
pub struct RecordingTransport {
    pub sent: Vec<Sent>,
    responder: Responder,
}

impl RecordingTransport {
    pub fn new(responder: impl FnMut(&Message) -> Reply + 'static) -> Self {
        Self { sent: Vec::new(), responder: Box::new(responder) }
    }

    /// Answers like a front-end on which every call succeeds.
    pub fn dry_run() -> Self {
        let mut executor = DryRunExecutor::new();
        Self::new(move |message| executor.reply(message))
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, message: &Message, buffers: Vec<Vec<u8>>) -> Result<(), RemoteError> {
        self.sent.push(Sent { message: message.clone(), buffers });
        Ok(())
    }

    fn request(&mut self, message: &Message, buffers: Vec<Vec<u8>>) -> Result<Reply, RemoteError> {
        self.sent.push(Sent { message: message.clone(), buffers });
        Ok((self.responder)(message))
    }
}

#[derive(Serialize)]
struct FrameRef<'a> {
    message: &'a Message,
    buffers: Vec<usize>,
}

/// Header line written before each message's buffer bytes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameHeader {
    pub message: Message,
    /// Byte length of each buffer following the header line, in order.
    pub buffers: Vec<usize>,
}

/// Line-framed JSON over a byte stream pair (e.g. stdin/stdout of a bridge
/// process).
///
/// Each message is one JSON header line followed by the raw bytes of its
/// buffers. Each reply is one JSON line.
pub struct JsonLinesTransport<R, W> {
    reader: R,
    writer: W,
    line: String,
}

impl<R: BufRead, W: Write> JsonLinesTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer, line: String::new() }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn write_frame(&mut self, message: &Message, buffers: &[Vec<u8>]) -> Result<(), RemoteError> {
        let header = FrameRef { message, buffers: buffers.iter().map(Vec::len).collect() };
        serde_json::to_writer(&mut self.writer, &header)?;
        self.writer.write_all(b"\n")?;
        for buffer in buffers {
            self.writer.write_all(buffer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Transport for JsonLinesTransport<R, W> {
    fn send(&mut self, message: &Message, buffers: Vec<Vec<u8>>) -> Result<(), RemoteError> {
        self.write_frame(message, &buffers)
    }

    fn request(&mut self, message: &Message, buffers: Vec<Vec<u8>>) -> Result<Reply, RemoteError> {
        self.write_frame(message, &buffers)?;

        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Err(RemoteError::Closed);
        }
        Ok(serde_json::from_str(self.line.trim_end())?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use serde_json::json;

    use super::*;
    use crate::protocol::Instruction;

    fn exec_msg() -> Message {
        Message::Exec { instructions: vec![Instruction::exec("flush", vec![])] }
    }

    #[test]
    fn recording_keeps_messages_in_order() {
        let mut t = RecordingTransport::new(|_| Reply::QueryReply { data: json!(null) });
        t.send(&exec_msg(), vec![]).unwrap();
        t.request(&Message::GetMethods { target: "context".into() }, vec![vec![1, 2]]).unwrap();

        assert_eq!(t.sent.len(), 2);
        assert_eq!(t.sent[0].message, exec_msg());
        assert_eq!(t.sent[1].buffers, [vec![1u8, 2]]);
    }

    #[test]
    fn json_lines_frame_has_header_then_bytes() {
        let mut t = JsonLinesTransport::new(Cursor::new(Vec::new()), Vec::new());
        t.send(&exec_msg(), vec![vec![0xAA, 0xBB, 0xCC]]).unwrap();

        let (_, out) = t.into_inner();
        let newline = out.iter().position(|b| *b == b'\n').unwrap();
        let header: FrameHeader = serde_json::from_slice(&out[..newline]).unwrap();
        assert_eq!(header.message, exec_msg());
        assert_eq!(header.buffers, [3]);
        assert_eq!(&out[newline + 1..], &[0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn json_lines_reads_one_reply_per_request() {
        let replies = "{\"type\":\"queryReply\",\"data\":\"key1\"}\n\
                       {\"type\":\"queryReply\",\"data\":true}\n";
        let mut t = JsonLinesTransport::new(Cursor::new(replies.as_bytes().to_vec()), Vec::new());
        let q = Message::Query { instructions: vec![Instruction::query("createProgram", vec![])] };

        assert_eq!(t.request(&q, vec![]).unwrap(), Reply::QueryReply { data: json!("key1") });
        assert_eq!(t.request(&q, vec![]).unwrap(), Reply::QueryReply { data: json!(true) });
        assert!(matches!(t.request(&q, vec![]), Err(RemoteError::Closed)));
    }

    #[test]
    fn json_lines_rejects_garbage_reply() {
        let mut t = JsonLinesTransport::new(Cursor::new(b"not json\n".to_vec()), Vec::new());
        let q = Message::Query { instructions: vec![Instruction::query("getError", vec![])] };
        assert!(matches!(t.request(&q, vec![]), Err(RemoteError::Json(_))));
    }
}
