//! Block format for collate dumps
//!
//! Every file becomes one block: a blank line, a begin marker naming the
//! file, the raw content, a newline, and an end marker naming the file.

pub mod markers;
pub mod parse;

pub use markers::MarkerFormatter;
pub use parse::{ParsedBlock, parse_dump};
