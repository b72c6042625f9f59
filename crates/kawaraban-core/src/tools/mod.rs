//! Tool descriptors, registry, and argument validation.
//!
//! Tools are the closed set of functions the model is permitted to invoke.
//! Each registry entry pairs a static [`ToolDescriptor`] (the schema sent to
//! the endpoint) with the handler that actually runs the call. Descriptors
//! enumerate their required parameters as data, so admissibility checks need
//! no reflection.

pub mod news;

use serde_json::{Map, Value, json};
use std::io;

/// Declaration of one tool parameter: its JSON type, an optional closed set
/// of allowed values, and whether the model must supply it.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub kind: String,
    pub allowed: Vec<String>,
    pub required: bool,
}

impl ParamSpec {
    pub fn required(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            allowed: Vec::new(),
            required: true,
        }
    }

    pub fn optional(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            allowed: Vec::new(),
            required: false,
        }
    }

    pub fn with_allowed(mut self, values: &[&str]) -> Self {
        self.allowed = values.iter().map(|v| v.to_string()).collect();
        self
    }
}

/// Static declaration of one callable tool: name, natural-language
/// description, and parameter schema. Immutable once registered.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

impl ToolDescriptor {
    pub fn new(name: &str, description: &str, params: Vec<ParamSpec>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            params,
        }
    }

    /// Convert to the OpenAI-style function definition sent to the endpoint.
    pub fn to_api_format(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.params {
            let mut prop = json!({ "type": param.kind });
            if !param.allowed.is_empty() {
                prop["enum"] = json!(param.allowed);
            }
            properties.insert(param.name.clone(), prop);
        }
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                }
            }
        })
    }
}

/// Check a proposed argument set against a tool's declared parameters.
///
/// Fails if any supplied name is undeclared, or if any required parameter is
/// missing. Types are NOT validated here; a type error surfaces later as a
/// normal invocation failure. Pure predicate, no I/O.
pub fn check_args(descriptor: &ToolDescriptor, args: &Map<String, Value>) -> bool {
    for name in args.keys() {
        if !descriptor.params.iter().any(|p| p.name == *name) {
            return false;
        }
    }
    for param in &descriptor.params {
        if param.required && !args.contains_key(&param.name) {
            return false;
        }
    }
    true
}

/// Uniform call contract for registered tools: named arguments in, a single
/// string payload out.
pub trait ToolHandler: Send + Sync {
    fn invoke(&self, args: &Map<String, Value>) -> io::Result<String>;
}

impl<F> ToolHandler for F
where
    F: Fn(&Map<String, Value>) -> io::Result<String> + Send + Sync,
{
    fn invoke(&self, args: &Map<String, Value>) -> io::Result<String> {
        self(args)
    }
}

/// A descriptor paired with its handler.
pub struct ToolEntry {
    descriptor: ToolDescriptor,
    handler: Box<dyn ToolHandler>,
}

impl ToolEntry {
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    pub fn invoke(&self, args: &Map<String, Value>) -> io::Result<String> {
        self.handler.invoke(args)
    }
}

/// The closed set of tools available to one conversation session.
///
/// Every descriptor sent to the endpoint comes from an entry here, so a name
/// the model echoes back either resolves to a handler or is rejected.
#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registers a tool. A later registration with the same name shadows an
    /// earlier one for lookup but both descriptors would be sent; callers are
    /// expected to register each name once.
    pub fn register(&mut self, descriptor: ToolDescriptor, handler: impl ToolHandler + 'static) {
        self.entries.push(ToolEntry {
            descriptor,
            handler: Box::new(handler),
        });
    }

    pub fn find(&self, name: &str) -> Option<&ToolEntry> {
        self.entries.iter().find(|e| e.descriptor.name == name)
    }

    /// Descriptor list in registration order, in endpoint format.
    pub fn api_format(&self) -> Vec<Value> {
        self.entries
            .iter()
            .map(|e| e.descriptor.to_api_format())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
