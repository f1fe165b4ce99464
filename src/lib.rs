//! remanifest - reduce a git-repo XML manifest to a minimal project list
//!
//! Fetches a `repo` tool manifest (`default.xml`) from a URL or local path,
//! keeps only its `project` entries (`name`, optional `path`), optionally
//! injects a `remote` declaration, and writes the pretty-printed result.

pub mod cli;
pub mod core;
pub mod net;
