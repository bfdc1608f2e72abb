//! Core types and functionality for mdx.
//!
//! This module contains the command table, interpreter launchers, argument
//! templates, configuration and the execution engine.

mod command;
mod config;
mod executor;
mod launcher;
mod registry;
mod template;

pub use command::{CodeBlock, CommandBlock};
pub use config::{
    scan_markdown_dir, Config, FileSource, FILE_DIR_ENV, FILE_PATH_ENV, LOG_LEVEL_ENV,
};
pub use executor::{materialize, script_contents, Executor, SCRIPT_PREFIX};
pub use launcher::{Launcher, LauncherRegistry};
pub use registry::CommandRegistry;
pub use template::{bind_arguments, placeholders};
