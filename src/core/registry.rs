//! Command registry.
//!
//! Holds every command loaded from markdown files, keyed by name. A name can
//! be inserted at most once; the registry is read-only once execution starts.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::CommandBlock;
use crate::error::{MdxError, Result};

/// Table of all loaded commands.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandBlock>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command, rejecting a name that is already defined.
    pub fn insert(&mut self, command: CommandBlock) -> Result<()> {
        if let Some(existing) = self.commands.get(&command.name) {
            return Err(MdxError::DuplicateCommand {
                name: command.name,
                first_defined: existing.source_file.clone(),
            });
        }
        self.commands.insert(command.name.clone(), command);
        Ok(())
    }

    /// Add a batch of commands from one file.
    ///
    /// Either every command is added or, on the first duplicate, none are.
    /// Names repeated within the batch count as duplicates too.
    pub fn insert_all(&mut self, commands: Vec<CommandBlock>) -> Result<()> {
        let mut batch: HashMap<&str, &Path> = HashMap::new();
        for command in &commands {
            let first_defined = self
                .defined_in(&command.name)
                .or_else(|| batch.get(command.name.as_str()).copied());
            if let Some(first_defined) = first_defined {
                return Err(MdxError::DuplicateCommand {
                    name: command.name.clone(),
                    first_defined: first_defined.to_path_buf(),
                });
            }
            batch.insert(&command.name, &command.source_file);
        }
        for command in commands {
            self.insert(command)?;
        }
        Ok(())
    }

    /// File a command name was defined in, if it exists.
    pub fn defined_in(&self, name: &str) -> Option<&Path> {
        self.commands.get(name).map(|c| c.source_file.as_path())
    }

    /// Get a command by name.
    pub fn get(&self, name: &str) -> Option<&CommandBlock> {
        self.commands.get(name)
    }

    /// Check whether a command is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Iterate over commands sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &CommandBlock> {
        self.commands.values()
    }

    /// Get total number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
