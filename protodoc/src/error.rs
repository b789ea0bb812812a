//! Error types. Every variant is fatal for the run.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The file does not have the shape the parser expects.
    #[error("{}:{line}: {kind}", .path.display())]
    StructuralViolation {
        path: PathBuf,
        line: usize,
        kind: StructuralKind,
    },

    /// Two option messages resolve to the same fully-qualified name.
    #[error(
        "duplicate option message `{name}` (declared in {} and {})",
        .first.display(),
        .second.display()
    )]
    DuplicateIdentity {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Root, destination or a discovered file is unusable.
    #[error("{}: {reason}", .path.display())]
    PreconditionViolation {
        path: PathBuf,
        reason: PreconditionKind,
    },

    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralKind {
    #[error("closing brace found before the package declaration")]
    BoundaryBeforeNamespace,

    #[error("package declaration does not end with ';'")]
    UnterminatedNamespace,

    #[error("required fields are not supported in option messages")]
    RequiredField,

    #[error("field declaration reached {limit} characters: `{declaration}`")]
    RunawayField { declaration: String, limit: usize },

    #[error("closing brace inside an unterminated field declaration: `{declaration}`")]
    UnterminatedField { declaration: String },

    #[error("field declaration has no `= <tag>`: `{declaration}`")]
    MissingAssignment { declaration: String },

    #[error("field `{field}` declared twice in `{group}`")]
    DuplicateField { group: String, field: String },

    #[error("end of file inside option message `{group}`")]
    UnterminatedGroup { group: String },
}

/// A [`StructuralKind`] with the 1-based line it was detected on.
///
/// The parser works on in-memory text and knows no path; callers attach one
/// through [`ParseError::in_file`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: StructuralKind,
}

impl ParseError {
    pub fn new(line: usize, kind: StructuralKind) -> Self {
        Self { line, kind }
    }

    pub fn in_file(self, path: impl Into<PathBuf>) -> Error {
        Error::StructuralViolation {
            path: path.into(),
            line: self.line,
            kind: self.kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionKind {
    #[error("does not exist")]
    Missing,
    #[error("is not a regular file")]
    NotAFile,
    #[error("is not a directory")]
    NotADirectory,
    #[error("is a symbolic link")]
    SymbolicLink,
}
