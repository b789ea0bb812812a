//! Collects rendered option blocks from every parsed file.
//!
//! Blocks are keyed by fully-qualified message name; a name may be declared
//! only once across the whole tree.

use crate::error::{Error, Result};
use crate::model::ParsedFile;
use crate::render::rst::render_group;
use std::collections::btree_map::{BTreeMap, Entry};
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct Block {
    source: PathBuf,
    text: String,
}

/// Rendered blocks by fully-qualified name, kept in sorted order.
#[derive(Debug, Default)]
pub struct Aggregation {
    blocks: BTreeMap<String, Block>,
    fields: usize,
    undocumented: usize,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render and add every group of `parsed`, which was read from `source`.
    pub fn insert(&mut self, source: &Path, parsed: ParsedFile) -> Result<()> {
        for group in parsed.groups {
            let entry = match self.blocks.entry(group.name.clone()) {
                Entry::Occupied(existing) => {
                    return Err(Error::DuplicateIdentity {
                        name: group.name,
                        first: existing.get().source.clone(),
                        second: source.to_path_buf(),
                    });
                }
                Entry::Vacant(entry) => entry,
            };
            self.fields += group.fields.len();
            self.undocumented += group.fields.iter().filter(|f| !f.is_documented()).count();
            entry.insert(Block {
                source: source.to_path_buf(),
                text: render_group(&group),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total number of fields across all groups.
    pub fn field_count(&self) -> usize {
        self.fields
    }

    /// Fields that fell back to the placeholder description.
    pub fn undocumented_count(&self) -> usize {
        self.undocumented
    }

    /// Rendered blocks in lexicographic order of their names.
    pub fn blocks(&self) -> impl Iterator<Item = &str> {
        self.blocks.values().map(|block| block.text.as_str())
    }
}
