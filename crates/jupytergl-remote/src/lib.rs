//! Remote GL context for notebook front-ends.
//!
//! GL calls are not executed in-process. They are serialized as instruction
//! lists and shipped to a WebGL executor running next to the canvas, which
//! replays them and answers queries.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`protocol`] | `Instruction`, `Message`, `Reply`, argument conventions |
//! | [`transport`] | `Transport` trait, `RecordingTransport`, `JsonLinesTransport` |
//! | [`dry_run`] | `DryRunExecutor`, a scripted stand-in for the front-end |
//! | [`context`] | `RemoteContext`, the `GlContext` implementation |
//!
//! # Quick start
//!
//! ```rust
//! use jupytergl_engine::glu::make_program;
//! use jupytergl_remote::{RecordingTransport, RemoteContext};
//!
//! let mut ctx = RemoteContext::new(RecordingTransport::dry_run());
//! let linked = make_program(
//!     &mut ctx,
//!     "void main() { gl_Position = vec4(0.0); }",
//!     "void main() { gl_FragColor = vec4(1.0); }",
//! )
//! .unwrap();
//! assert_eq!(linked.program.key(), "key1");
//! ```

pub mod config;
pub mod context;
pub mod dry_run;
pub mod error;
pub mod protocol;
pub mod transport;

pub use config::RemoteConfig;
pub use context::RemoteContext;
pub use dry_run::DryRunExecutor;
pub use error::RemoteError;
pub use protocol::{BufferKind, Instruction, Message, RemoteHandle, Reply};
pub use transport::{JsonLinesTransport, RecordingTransport, Transport};
