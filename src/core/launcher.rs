//! Interpreter launchers.
//!
//! Maps a fence language tag to the interpreter that runs it and the file
//! extension used for the materialized script. Built once at startup by
//! probing `PATH`.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{MdxError, Result};

/// Interpreter and script extension for one language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    /// Interpreter name, used as `#!/usr/bin/env <interpreter>`
    pub interpreter: String,

    /// Extension of the temporary script file
    pub extension: String,
}

impl Launcher {
    /// Create a launcher.
    pub fn new(interpreter: impl Into<String>, extension: impl Into<String>) -> Self {
        Self { interpreter: interpreter.into(), extension: extension.into() }
    }
}

/// Registry of launchers keyed by language tag.
#[derive(Debug, Default, Clone)]
pub struct LauncherRegistry {
    launchers: HashMap<String, Launcher>,
}

impl LauncherRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe `PATH` for the supported interpreters.
    pub fn detect() -> Self {
        Self::detect_with(|name| which::which(name).ok())
    }

    /// Build the registry using `find` to locate executables.
    ///
    /// `sh` registers both `sh` and `bash`; a real `bash` then replaces the
    /// `bash` entry. `python` falls back to `python3`.
    pub fn detect_with<F>(find: F) -> Self
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let mut registry = Self::new();
        let mut added = Vec::new();

        if let Some(path) = find("sh") {
            registry.register("sh", Launcher::new("sh", "sh"));
            registry.register("bash", Launcher::new("sh", "sh"));
            added.push(path);
        }

        if let Some(path) = find("bash") {
            registry.register("bash", Launcher::new("bash", "bash"));
            added.push(path);
        }

        for candidate in ["python", "python3"] {
            if let Some(path) = find(candidate) {
                registry.register("python", Launcher::new(candidate, "py"));
                added.push(path);
                break;
            }
        }

        tracing::debug!(launchers = ?added, "Added launchers");
        registry
    }

    /// Register or replace the launcher for a tag.
    pub fn register(&mut self, tag: impl Into<String>, launcher: Launcher) {
        self.launchers.insert(tag.into(), launcher);
    }

    /// Look up the launcher for a tag.
    pub fn resolve(&self, tag: &str) -> Result<&Launcher> {
        self.launchers.get(tag).ok_or_else(|| MdxError::NoLauncherDefined(tag.to_string()))
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<_> = self.launchers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}
