//! Property-based tests for tree-text invariants

mod round_trip;
mod tree_text;
