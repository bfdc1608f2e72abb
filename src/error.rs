//! Error types for loading and running markdown commands.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for mdx operations.
pub type Result<T> = std::result::Result<T, MdxError>;

/// Errors that can occur while loading or running commands.
#[derive(Debug, Error)]
pub enum MdxError {
    /// The requested command is not defined in any loaded file.
    #[error("command not found: {0}")]
    CommandNotFound(String),

    /// A command depends on a name that is not defined.
    #[error("dependency not found: '{dependency}' (required by '{command}')")]
    DependencyNotFound { command: String, dependency: String },

    /// A command reaches itself through its dependencies.
    #[error("dependency cycle detected: {}", .0.join(" -> "))]
    DependencyCycle(Vec<String>),

    /// A command name was declared twice.
    #[error("duplicate command found: '{name}' was already defined in '{}'", first_defined.display())]
    DuplicateCommand { name: String, first_defined: PathBuf },

    /// A code block has neither an infostring nor a shebang line.
    #[error("no infostring and no shebang defined for command '{command}' in '{}'", file.display())]
    NoInfostringOrShebang { command: String, file: PathBuf },

    /// No launcher is registered for a code block's language tag.
    #[error("no launcher defined for infostring: '{0}'")]
    NoLauncherDefined(String),

    /// An argument was supplied but its placeholder does not appear in the code.
    #[error("argument provided but not used in the template: argument {position} (\"{value}\")")]
    ArgProvidedButNotUsed { position: usize, value: String },

    /// A placeholder appears in the code but no argument was supplied for it.
    #[error("argument used in template but not provided in args: {{{{.arg{0}}}}}")]
    ArgUsedInTemplateNotProvided(usize),

    /// The code contains a malformed or unsupported template action.
    #[error("failed to parse template: {0}")]
    TemplateParseFailure(String),

    /// A materialized script could not be spawned or exited unsuccessfully.
    #[error("failed to execute code block {block} of command '{command}': {reason}\n--- script ---\n{script}")]
    ProcessExecutionFailure { command: String, block: usize, reason: String, script: String },

    /// A directory scan found no markdown files.
    #[error("no markdown files found in '{}'", .0.display())]
    NoMarkdownFiles(PathBuf),

    /// A markdown file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
