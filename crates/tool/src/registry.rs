use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::ToolDescriptor;
use crate::tool::Tool;

/// Per-agent mapping of tool name to tool implementation.
///
/// Populated once, at agent construction, by the `#[agent]` macro walking
/// every method the macro found marked `#[tool]` — the Rust analogue of
/// scanning an instance's members for an `is_tool` marker at runtime.
/// Read-heavy thereafter: a workflow looks up each node's tool by name on
/// every step.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use toolagent_tool::{Tool, ToolArgs, ToolDescriptor, ToolError, ToolRegistry};
///
/// struct NoOp(ToolDescriptor);
/// #[async_trait]
/// impl Tool for NoOp {
///     fn descriptor(&self) -> &ToolDescriptor { &self.0 }
///     async fn call(&self, _args: ToolArgs) -> Result<Value, ToolError> { Ok(Value::Null) }
/// }
///
/// let mut registry = ToolRegistry::new();
/// registry.register(Arc::new(NoOp(ToolDescriptor::new("noop", "Does nothing"))));
///
/// assert!(registry.get("noop").is_some());
/// assert!(registry.get("unknown").is_none());
/// ```
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, keyed by its descriptor's name. Overwrites any
    /// existing tool registered under the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.descriptor().name.clone();
        self.tools.insert(name, tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// `true` iff a tool with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Descriptors of every registered tool, in no particular order.
    pub fn list(&self) -> Vec<&ToolDescriptor> {
        self.tools.values().map(|t| t.descriptor()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// `true` iff no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Iterate over all `(name, tool)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Tool>)> {
        self.tools.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("count", &self.tools.len())
            .field("names", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ToolError;
    use async_trait::async_trait;
    use serde_json::Value;

    struct Dummy(ToolDescriptor);

    #[async_trait]
    impl Tool for Dummy {
        fn descriptor(&self) -> &ToolDescriptor {
            &self.0
        }
        async fn call(&self, _args: crate::tool::ToolArgs) -> Result<Value, ToolError> {
            Ok(Value::Null)
        }
    }

    fn make(name: &str) -> Arc<dyn Tool> {
        Arc::new(Dummy(ToolDescriptor::new(name, "test")))
    }

    #[test]
    fn empty_registry() {
        let reg = ToolRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.get("anything").is_none());
    }

    #[test]
    fn register_and_get() {
        let mut reg = ToolRegistry::new();
        reg.register(make("add"));
        assert_eq!(reg.len(), 1);
        assert!(reg.contains("add"));
        assert_eq!(reg.get("add").unwrap().descriptor().name, "add");
    }

    #[test]
    fn overwrite_existing() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(Dummy(
            ToolDescriptor::new("x", "v1"),
        )));
        reg.register(Arc::new(Dummy(
            ToolDescriptor::new("x", "v2"),
        )));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("x").unwrap().descriptor().description, "v2");
    }

    #[test]
    fn list_and_iter() {
        let mut reg = ToolRegistry::new();
        reg.register(make("a"));
        reg.register(make("b"));

        let mut names: Vec<&str> = reg.iter().map(|(k, _)| k).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(reg.list().len(), 2);
    }

    #[test]
    fn debug_format() {
        let mut reg = ToolRegistry::new();
        reg.register(make("test"));
        let debug = format!("{reg:?}");
        assert!(debug.contains("ToolRegistry"));
        assert!(debug.contains("count: 1"));
    }
}
