// src/frontmatter/mod.rs
// =============================================================================
// Front matter: the YAML block at the head of a markdown document.
//
// Submodules:
// - codec: split a block off a document, join one back on
// - merge: generated values + the file's own values (file wins)
// =============================================================================

use std::collections::BTreeMap;

mod codec;
mod merge;

pub use codec::{join, split};
pub use merge::merge;

/// Front-matter keys and their YAML values, always in sorted key order
pub type FrontMatter = BTreeMap<String, serde_yaml::Value>;
