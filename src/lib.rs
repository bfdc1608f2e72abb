//! # mdx
//!
//! Run the code blocks of a markdown file as named commands.
//!
//! A heading containing `[name](dep1 dep2)` declares the command `name`, which
//! depends on `dep1` and `dep2`. The fenced code blocks below the heading are
//! its body. Running a command runs its dependencies first, then writes each
//! code block to a temporary script and executes it with the interpreter named
//! by the fence infostring or the block's own shebang.
//!
//! ## Quick Start
//!
//! ````markdown
//! ## [greet](setup)
//!
//! ```sh
//! echo "Hello, {{.arg1}}"
//! ```
//! ````
//!
//! ```bash
//! mdx greet World
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_panics_doc)]

pub mod app;
pub mod core;
pub mod error;
pub mod markdown;

// Re-export commonly used types
pub use app::App;
pub use crate::core::{CodeBlock, CommandBlock, CommandRegistry, Config, Executor, LauncherRegistry};
pub use error::{MdxError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "mdx";
