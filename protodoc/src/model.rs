//! Data model for parsed option documentation.

/// Description used for fields without any preceding comment.
pub const NODOC: &str = "Not yet documented.";

/// Everything recovered from a single `.proto` file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedFile {
    /// `package` declaration, if the file has one.
    pub namespace: Option<String>,
    /// Option messages in declaration order.
    pub groups: Vec<DocumentedGroup>,
}

/// A `message FooOptions { ... }` block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocumentedGroup {
    /// Fully-qualified name, e.g. `cartographer.mapping.proto.MapBuilder`.
    pub name: String,
    /// Comments directly above the `message` line
    pub preceding: Vec<String>,
    /// Comments left over when the closing brace is reached
    pub trailing: Vec<String>,
    pub fields: Vec<Field>,
}

impl DocumentedGroup {
    pub fn new(name: String, preceding: Vec<String>) -> Self {
        Self {
            name,
            preceding,
            ..Self::default()
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A single `optional` field of an option message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// Declared type, e.g. `double` or `mapping.proto.PoseGraphOptions`
    pub value_type: String,
    pub description: Vec<String>,
}

impl Field {
    /// Build a field, substituting [`NODOC`] for an empty description.
    pub fn new(name: String, value_type: String, description: Vec<String>) -> Self {
        let description = if description.is_empty() {
            vec![NODOC.to_string()]
        } else {
            description
        };
        Self {
            name,
            value_type,
            description,
        }
    }

    pub fn is_documented(&self) -> bool {
        self.description != [NODOC]
    }
}
