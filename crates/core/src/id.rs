//! String-based identifiers shared across toolagent crates.
//!
//! Unlike the numeric or UUID identifiers common in long-running services,
//! these ids are short, human-writable handles: node ids inside a single
//! dataflow graph, port ids derived from them, and kernel ids handed back
//! to callers of the step-wise executor. All three are newtypes over
//! `String` so call sites can't accidentally pass a node id where a
//! kernel id is expected.

use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a string as an id without validation.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the id as a plain string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifies a node within a single workflow's dataflow graph.
    ///
    /// Stable only within the graph it was produced from; two different
    /// workflows may reuse the same node id without conflict.
    NodeId
);

string_id!(
    /// Identifies an input or output port on a graph node.
    ///
    /// By convention formatted as `<node_id>:input:<index>` or
    /// `<node_id>:output:<index>`, but nothing in this crate enforces that
    /// shape — parsing lives on `Port` in `toolagent-workflow`.
    PortId
);

string_id!(
    /// Identifies a directed edge between an output port and an input port.
    EdgeId
);

string_id!(
    /// Identifies a suspended, resumable workflow run inside the executor.
    ///
    /// Handed to the caller by `start(step_by_step = true)` and required on
    /// every subsequent `continue`/`cancel` call.
    KernelId
);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn displays_as_inner_string() {
        let id = NodeId::new("node_0");
        assert_eq!(id.to_string(), "node_0");
        assert_eq!(id.as_str(), "node_0");
    }

    #[test]
    fn distinct_types_do_not_mix() {
        let node = NodeId::from("node_0");
        let kernel = KernelId::from("node_0");
        // Same text, different types — this is the point of the newtype.
        assert_eq!(node.as_str(), kernel.as_str());
    }

    #[test]
    fn serde_roundtrip() {
        let id = KernelId::new("k07abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"k07abc\"");
        let back: KernelId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
