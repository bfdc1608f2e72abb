//! Configuration for mdx.
//!
//! Decides which markdown files to load and how verbose logging is. Values
//! come from the `--file` flag and `MDX_*` environment variables.

use std::env;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{MdxError, Result};

/// Directory whose `*.md` files are loaded.
pub const FILE_DIR_ENV: &str = "MDX_FILE_DIR";

/// Single markdown file to load.
pub const FILE_PATH_ENV: &str = "MDX_FILE_PATH";

/// Log level (`DEBUG`, `INFO`, `ERROR`; anything else means warn).
pub const LOG_LEVEL_ENV: &str = "MDX_LOG_LEVEL";

/// Where the markdown files come from, in order of precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// `--file` flag
    Flag(PathBuf),
    /// `MDX_FILE_DIR`
    Directory(PathBuf),
    /// `MDX_FILE_PATH`
    Path(PathBuf),
    /// `*.md` in the working directory
    WorkingDir(PathBuf),
}

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Value of the `--file` flag
    pub file: Option<PathBuf>,

    /// Value of `MDX_FILE_DIR`
    pub file_dir: Option<PathBuf>,

    /// Value of `MDX_FILE_PATH`
    pub file_path: Option<PathBuf>,

    /// Value of `MDX_LOG_LEVEL`
    pub log_level: Option<String>,

    /// Directory scanned when nothing else is set
    pub working_dir: PathBuf,
}

impl Config {
    /// Build a configuration from the flag and the process environment.
    pub fn from_env(file: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            file,
            file_dir: non_empty_var(FILE_DIR_ENV).map(PathBuf::from),
            file_path: non_empty_var(FILE_PATH_ENV).map(PathBuf::from),
            log_level: non_empty_var(LOG_LEVEL_ENV),
            working_dir: env::current_dir()?,
        })
    }

    /// Pick the file source with the highest precedence.
    pub fn file_source(&self) -> FileSource {
        if let Some(ref file) = self.file {
            FileSource::Flag(file.clone())
        } else if let Some(ref dir) = self.file_dir {
            FileSource::Directory(dir.clone())
        } else if let Some(ref path) = self.file_path {
            FileSource::Path(path.clone())
        } else {
            FileSource::WorkingDir(self.working_dir.clone())
        }
    }

    /// Markdown files to load, in load order.
    pub fn markdown_files(&self) -> Result<Vec<PathBuf>> {
        let source = self.file_source();
        tracing::debug!(?source, "Selecting markdown files");

        match source {
            FileSource::Flag(path) | FileSource::Path(path) => Ok(vec![path]),
            FileSource::Directory(dir) | FileSource::WorkingDir(dir) => scan_markdown_dir(&dir),
        }
    }

    /// Tracing filter directive for the configured level.
    pub fn log_filter(&self, verbose: bool) -> &'static str {
        if verbose {
            return "debug";
        }
        match self.log_level.as_deref().map(str::to_ascii_uppercase).as_deref() {
            Some("DEBUG") => "debug",
            Some("INFO") => "info",
            Some("ERROR") => "error",
            _ => "warn",
        }
    }
}

/// `*.md` files directly inside `dir`, sorted by name.
pub fn scan_markdown_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            MdxError::Read { path, source: e.into() }
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        return Err(MdxError::NoMarkdownFiles(dir.to_path_buf()));
    }
    Ok(files)
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
