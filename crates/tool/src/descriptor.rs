//! Static description of a tool's name, parameters, and documentation.

/// One declared parameter of a tool, as seen by the dataflow serializer and
/// by `to_json` introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    /// Parameter name, as it appears in the tool's signature.
    pub name: String,
    /// The declared type name (e.g. `"f64"`, `"String"`), used to label
    /// graph ports and to render `to_json` reports — never enforced at
    /// runtime, since arguments travel as `serde_json::Value`.
    pub type_name: String,
}

impl ParamDescriptor {
    /// Construct a parameter descriptor.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Name, docstring, and parameter list of a tool.
///
/// Lifetime equals the lifetime of the owning agent instance: built once
/// when the agent's tool registry is populated, then immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// The tool's name, used as its key in the agent's tool registry and as
    /// the `type` of any graph node produced from a call to it.
    pub name: String,
    /// First line of the tool's documentation, shown by `to_json` and by
    /// the agent's self-description.
    pub description: String,
    /// Declared parameters, in positional order.
    pub params: Vec<ParamDescriptor>,
}

impl ToolDescriptor {
    /// Construct a tool descriptor with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter declaration.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.params.push(ParamDescriptor::new(name, type_name));
        self
    }

    /// Look up a parameter's declared type by name.
    pub fn param_type(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.type_name.as_str())
    }
}
