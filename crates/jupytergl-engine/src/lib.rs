//! jupytergl engine crate.
//!
//! Small GL helpers consumed by a larger visualization host: vector/matrix
//! builders for view and projection transforms, and a shader program builder
//! that talks to whatever GL binding the host injects through [`GlContext`].
//!
//! [`GlContext`]: device::GlContext

pub mod coords;
pub mod device;
pub mod glu;
pub mod logging;
