//! Parsing and rendering for the `instruction-macros` derives.
//!
//! Kept out of the proc-macro crate so the parse/render logic can be unit tested with plain
//! `syn::parse_quote!` inputs.

pub mod parse;
pub mod path_audit;
pub mod render;
