//! Parser module: turns definition files into [`ParsedFile`]s.

pub mod proto;

use crate::error::Result;
use crate::model::ParsedFile;
use std::path::Path;

/// Extension of the definition files the parser understands.
pub const EXTENSION: &str = "proto";

/// Parse one definition file, attaching `path` to any structural error.
pub fn parse_file(path: &Path, content: &str) -> Result<ParsedFile> {
    proto::parse(content).map_err(|e| e.in_file(path))
}
