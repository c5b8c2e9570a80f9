//! Diff estructural entre un árbol esperado y uno observado.

mod engine;
mod entry;

pub use engine::{deep_compare, deep_compare_str};
pub use entry::{format_diffs, DiffEntry};
