/// Failure talking to the remote executor.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("transport i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    /// The executor raised while evaluating a query.
    #[error("remote query failed: {message}")]
    Query { message: String },

    #[error("expected {expected}, got {reply}")]
    UnexpectedReply { expected: &'static str, reply: String },

    #[error("transport closed")]
    Closed,

    #[error("protocol error: {0}")]
    Protocol(String),
}
