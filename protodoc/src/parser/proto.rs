//! Line-by-line state machine for option messages in `.proto` files.
//!
//! Only the subset of the language needed for documentation is understood:
//!
//! - `package foo.bar;` sets the namespace for the whole file
//! - `// text` comments directly above `message XOptions {` describe the message
//! - `// text` comments directly above `optional <type> <name> = <tag>;` describe the field
//! - comments left over before the closing `}` are kept as trailing text
//!
//! Everything else (enums, nested messages, imports, proto3 fields) is skipped.

use crate::error::{ParseError, StructuralKind};
use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

/// Joined field declarations must stay strictly below this length.
pub const MAX_DECLARATION_LEN: usize = 200;

/// Bookkeeping comment (`// NEXT ID: 12`) that never reaches the output.
const NEXT_ID_MARKER: &str = "NEXT ID:";

// -- Regex patterns -----------------------------------------------------------

static RE_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^package(.*?)(;)?$").unwrap());

static RE_OPTIONS_MESSAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^message(.*)Options \{$").unwrap());

// `optional <type> <name> = <tag>;` after continuation lines were joined
static RE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^optional(.*?)\s*=\s*[0-9]*\s*;$").unwrap());

// -- Line classification ------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    /// Comment text with the `//` marker and surrounding whitespace removed
    Comment(&'a str),
    /// Any non-comment line containing `}`
    Boundary,
    Code(&'a str),
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    // Comments are matched before the brace test, so a `}` inside a comment
    // (even in the license header) is never a boundary.
    if line.is_empty() {
        Line::Blank
    } else if let Some(text) = line.strip_prefix("//") {
        Line::Comment(text.trim())
    } else if line.contains('}') {
        Line::Boundary
    } else {
        Line::Code(line)
    }
}

fn push_comment(buffer: &mut Vec<String>, text: &str) {
    if !text.starts_with(NEXT_ID_MARKER) {
        buffer.push(text.to_string());
    }
}

// -- Parser state -------------------------------------------------------------

enum State {
    SeekingNamespace,
    SeekingGroup {
        comments: Vec<String>,
    },
    InGroup {
        group: DocumentedGroup,
        comments: Vec<String>,
    },
    /// A field declaration spanning several lines, not yet terminated by `;`
    InField {
        group: DocumentedGroup,
        comments: Vec<String>,
        declaration: String,
    },
}

#[derive(Default)]
struct Parser {
    namespace: Option<String>,
    groups: Vec<DocumentedGroup>,
}

// -- Public API ---------------------------------------------------------------

/// Parse the contents of one `.proto` file.
///
/// A file without a `package` line yields no groups.
pub fn parse(input: &str) -> Result<ParsedFile, ParseError> {
    let mut parser = Parser::default();
    let mut state = State::SeekingNamespace;
    let mut last_line = 0;

    for (index, raw) in input.lines().enumerate() {
        last_line = index + 1;
        state = parser
            .step(state, classify(raw))
            .map_err(|kind| ParseError::new(last_line, kind))?;
    }

    match state {
        State::InGroup { group, .. } | State::InField { group, .. } => Err(ParseError::new(
            last_line,
            StructuralKind::UnterminatedGroup { group: group.name },
        )),
        State::SeekingNamespace | State::SeekingGroup { .. } => Ok(ParsedFile {
            namespace: parser.namespace,
            groups: parser.groups,
        }),
    }
}

// -- Transitions --------------------------------------------------------------

impl Parser {
    fn step(&mut self, state: State, line: Line<'_>) -> Result<State, StructuralKind> {
        match state {
            State::SeekingNamespace => self.seek_namespace(line),
            State::SeekingGroup { comments } => Ok(self.seek_group(comments, line)),
            State::InGroup { group, comments } => self.group_body(group, comments, line),
            State::InField {
                group,
                comments,
                declaration,
            } => continue_field(group, comments, declaration, line),
        }
    }

    fn seek_namespace(&mut self, line: Line<'_>) -> Result<State, StructuralKind> {
        match line {
            Line::Boundary => Err(StructuralKind::BoundaryBeforeNamespace),
            Line::Code(code) => {
                let Some(caps) = RE_PACKAGE.captures(code) else {
                    return Ok(State::SeekingNamespace);
                };
                if caps.get(2).is_none() {
                    return Err(StructuralKind::UnterminatedNamespace);
                }
                let namespace = caps[1].trim().to_string();
                debug!(%namespace, "package declaration");
                self.namespace = Some(namespace);
                Ok(State::SeekingGroup {
                    comments: Vec::new(),
                })
            }
            Line::Blank | Line::Comment(_) => Ok(State::SeekingNamespace),
        }
    }

    fn seek_group(&self, mut comments: Vec<String>, line: Line<'_>) -> State {
        match line {
            Line::Blank => {}
            Line::Comment(text) => push_comment(&mut comments, text),
            // The comments belonged to whatever just closed.
            Line::Boundary => comments.clear(),
            Line::Code(code) => {
                if let Some(caps) = RE_OPTIONS_MESSAGE.captures(code) {
                    let name = self.qualify(caps[1].trim());
                    debug!(group = %name, "found option message");
                    return State::InGroup {
                        group: DocumentedGroup::new(name, comments),
                        comments: Vec::new(),
                    };
                }
            }
        }
        State::SeekingGroup { comments }
    }

    fn group_body(
        &mut self,
        mut group: DocumentedGroup,
        mut comments: Vec<String>,
        line: Line<'_>,
    ) -> Result<State, StructuralKind> {
        match line {
            Line::Blank => {}
            Line::Comment(text) => push_comment(&mut comments, text),
            Line::Boundary => {
                group.trailing = comments;
                self.groups.push(group);
                return Ok(State::SeekingGroup {
                    comments: Vec::new(),
                });
            }
            Line::Code(code) => {
                if code.starts_with("required") {
                    return Err(StructuralKind::RequiredField);
                }
                if code.starts_with("optional") {
                    return accumulate(group, comments, code.to_string());
                }
                trace!(group = %group.name, line = code, "ignoring line in option message");
            }
        }
        Ok(State::InGroup { group, comments })
    }

    fn qualify(&self, local: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}.{local}"),
            None => local.to_string(),
        }
    }
}

fn continue_field(
    group: DocumentedGroup,
    mut comments: Vec<String>,
    mut declaration: String,
    line: Line<'_>,
) -> Result<State, StructuralKind> {
    match line {
        Line::Blank => {}
        Line::Comment(text) => push_comment(&mut comments, text),
        Line::Boundary => return Err(StructuralKind::UnterminatedField { declaration }),
        Line::Code(code) => {
            if code.starts_with("required") {
                return Err(StructuralKind::RequiredField);
            }
            declaration.push(' ');
            declaration.push_str(code);
            return accumulate(group, comments, declaration);
        }
    }
    Ok(State::InField {
        group,
        comments,
        declaration,
    })
}

/// Check the partial declaration and either finish the field or keep waiting for `;`.
fn accumulate(
    mut group: DocumentedGroup,
    comments: Vec<String>,
    declaration: String,
) -> Result<State, StructuralKind> {
    if declaration.len() >= MAX_DECLARATION_LEN {
        return Err(StructuralKind::RunawayField {
            declaration,
            limit: MAX_DECLARATION_LEN,
        });
    }
    if !declaration.ends_with(';') {
        return Ok(State::InField {
            group,
            comments,
            declaration,
        });
    }

    let (value_type, name) = split_declaration(&declaration)?;
    if group.field(&name).is_some() {
        return Err(StructuralKind::DuplicateField {
            group: group.name,
            field: name,
        });
    }
    trace!(group = %group.name, field = %name, %value_type, "found field");
    group.fields.push(Field::new(name, value_type, comments));
    Ok(State::InGroup {
        group,
        comments: Vec::new(),
    })
}

/// Split `optional <type> <name> = <tag>;` into `(type, name)`.
fn split_declaration(declaration: &str) -> Result<(String, String), StructuralKind> {
    let caps = RE_FIELD
        .captures(declaration)
        .ok_or_else(|| StructuralKind::MissingAssignment {
            declaration: declaration.to_string(),
        })?;
    let body = caps[1].trim();
    Ok(match body.rsplit_once(char::is_whitespace) {
        Some((value_type, name)) => (value_type.trim().to_string(), name.to_string()),
        None => (String::new(), body.to_string()),
    })
}
