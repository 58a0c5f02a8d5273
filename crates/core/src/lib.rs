//! # toolagent-core
//!
//! Shared identifiers used across the toolagent workspace: node, port, edge,
//! and kernel ids. Kept separate from `toolagent-result`/`toolagent-error`
//! so that every other crate can depend on it without pulling in the result
//! algebra or error machinery.

pub mod id;

pub use id::{EdgeId, KernelId, NodeId, PortId};

/// Common imports for downstream crates.
pub mod prelude {
    pub use crate::{EdgeId, KernelId, NodeId, PortId};
}
