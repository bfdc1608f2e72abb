//! Application state and lifecycle management.
//!
//! The `App` owns the command table and the launcher registry, fills them
//! from the configured markdown files, and runs or lists commands.

use crate::core::{CommandBlock, CommandRegistry, Config, Executor, LauncherRegistry};
use crate::error::Result;
use crate::markdown::load_files;

/// Main application state.
///
/// Both registries are filled once by [`App::initialize`] and only read
/// afterwards.
#[derive(Debug)]
pub struct App {
    /// Application configuration
    pub config: Config,

    /// All commands loaded from markdown
    pub registry: CommandRegistry,

    /// Interpreters available for code blocks
    pub launchers: LauncherRegistry,
}

impl App {
    /// Create an application with empty registries.
    pub fn new(config: Config) -> Self {
        Self { config, registry: CommandRegistry::new(), launchers: LauncherRegistry::new() }
    }

    /// Create an application from explicit registries.
    ///
    /// A non-empty launcher registry is kept by [`App::initialize`].
    pub fn with_registries(
        config: Config,
        registry: CommandRegistry,
        launchers: LauncherRegistry,
    ) -> Self {
        Self { config, registry, launchers }
    }

    /// Load every configured markdown file, detecting launchers first if
    /// none were supplied.
    pub fn initialize(&mut self) -> Result<()> {
        if self.launchers.tags().is_empty() {
            self.launchers = LauncherRegistry::detect();
        }

        let files = self.config.markdown_files()?;
        let count = load_files(&files, &mut self.registry)?;
        tracing::debug!(files = files.len(), commands = count, "Loaded commands");

        Ok(())
    }

    /// Run a command and its dependencies.
    pub fn run(&self, name: &str, args: &[String], dry_run: bool) -> Result<()> {
        Executor::new(&self.registry, &self.launchers).dry_run(dry_run).run(name, args)
    }

    /// All loaded commands, sorted by name.
    pub fn commands(&self) -> Vec<&CommandBlock> {
        self.registry.iter().collect()
    }
}
