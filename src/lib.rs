//! fstree: directory trees as plain text
//!
//! Dumps a directory (structure and, optionally, file contents) into a
//! tree-style text file, rebuilds directories from such a file, and verifies
//! either direction against the filesystem.

pub mod cli;
pub mod config;
pub mod error;
pub mod ignore;
pub mod logging;
pub mod tree;
