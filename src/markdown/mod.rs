//! Markdown runbook parsing.
//!
//! Headings of the form `[name](dep1 dep2)` declare commands; the fenced code
//! blocks below them are the commands' bodies.

mod heading;
mod parser;

pub use heading::CommandHeading;
pub use parser::{load_file, load_files, parse_blocks, parse_commands, Block};
