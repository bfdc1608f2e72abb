//! Command execution module.
//!
//! Runs a command by first running its dependencies depth-first, then each of
//! its own code blocks. Every code block is written to a temporary executable
//! script and spawned directly, with output streamed to the terminal.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command as ProcessCommand, Stdio};

use tempfile::TempPath;

use super::{bind_arguments, CodeBlock, CommandBlock, CommandRegistry, Launcher, LauncherRegistry};
use crate::error::{MdxError, Result};

/// Prefix of every materialized script file.
pub const SCRIPT_PREFIX: &str = "mdx-";

/// Runs commands from a registry.
#[derive(Debug)]
pub struct Executor<'a> {
    commands: &'a CommandRegistry,
    launchers: &'a LauncherRegistry,

    /// Print scripts instead of running them
    dry_run: bool,
}

impl<'a> Executor<'a> {
    /// Create a new executor.
    pub fn new(commands: &'a CommandRegistry, launchers: &'a LauncherRegistry) -> Self {
        Self { commands, launchers, dry_run: false }
    }

    /// Set dry run mode.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run `name` and its dependencies with the given arguments.
    ///
    /// Every command in the chain receives the same arguments. The first
    /// failure stops the run; side effects of commands that already ran are
    /// kept.
    pub fn run(&self, name: &str, args: &[String]) -> Result<()> {
        tracing::debug!(command = name, ?args, "Executing command");

        for command in self.plan(name)? {
            self.execute_command(command, args)?;
        }
        Ok(())
    }

    /// Resolve the order in which commands run for `name`.
    ///
    /// Dependencies come before their dependents, in declared order. A command
    /// reached twice runs twice. Missing names and cycles are reported here,
    /// before anything executes.
    pub fn plan(&self, name: &str) -> Result<Vec<&'a CommandBlock>> {
        let root =
            self.commands.get(name).ok_or_else(|| MdxError::CommandNotFound(name.to_string()))?;

        let mut order = Vec::new();
        let mut path = Vec::new();
        self.visit(root, &mut path, &mut order)?;
        Ok(order)
    }

    fn visit(
        &self,
        command: &'a CommandBlock,
        path: &mut Vec<&'a str>,
        order: &mut Vec<&'a CommandBlock>,
    ) -> Result<()> {
        path.push(&command.name);

        for dep in &command.dependencies {
            if let Some(start) = path.iter().position(|name| *name == dep.as_str()) {
                let mut cycle: Vec<String> = path[start..].iter().map(|s| (*s).to_string()).collect();
                cycle.push(dep.clone());
                return Err(MdxError::DependencyCycle(cycle));
            }

            let dependency = self.commands.get(dep).ok_or_else(|| MdxError::DependencyNotFound {
                command: command.name.clone(),
                dependency: dep.clone(),
            })?;
            self.visit(dependency, path, order)?;
        }

        path.pop();
        order.push(command);
        Ok(())
    }

    /// Run the code blocks of a single command, ignoring its dependencies.
    ///
    /// Only the first code block is bound to `args`; later blocks are bound
    /// to no arguments.
    pub fn execute_command(&self, command: &CommandBlock, args: &[String]) -> Result<()> {
        for (i, block) in command.code_blocks.iter().enumerate() {
            tracing::debug!(command = %command.name, block = i + 1, lang = %block.lang, "Executing code block");

            let block_args: &[String] = if i == 0 { args } else { &[] };
            let rendered = bind_arguments(&block.code, block_args)?;
            self.execute_block(command, i + 1, block, &rendered)?;
        }
        Ok(())
    }

    fn execute_block(
        &self,
        command: &CommandBlock,
        index: usize,
        block: &CodeBlock,
        rendered: &str,
    ) -> Result<()> {
        let launcher = match self.launchers.resolve(&block.lang) {
            Ok(launcher) => Some(launcher),
            Err(_) if block.has_shebang => None,
            Err(e) => return Err(e),
        };
        let contents = script_contents(block, rendered, launcher)?;

        if self.dry_run {
            println!("# {} [{}/{}]", command.name, index, command.code_blocks.len());
            println!("{contents}");
            return Ok(());
        }

        let extension = launcher.map_or("", |l| l.extension.as_str());
        let script = materialize(&contents, extension)?;
        run_script(&script).map_err(|reason| {
            let contents = fs::read_to_string(&script)
                .unwrap_or_else(|e| format!("<failed to read script: {e}>"));
            MdxError::ProcessExecutionFailure {
                command: command.name.clone(),
                block: index,
                reason,
                script: contents,
            }
        })
    }
}

/// Full text of the script for a bound code block.
///
/// Blocks without a shebang get `#!/usr/bin/env <interpreter>` prepended.
pub fn script_contents(
    block: &CodeBlock,
    rendered: &str,
    launcher: Option<&Launcher>,
) -> Result<String> {
    if block.has_shebang {
        return Ok(rendered.to_string());
    }
    let launcher = launcher.ok_or_else(|| MdxError::NoLauncherDefined(block.lang.clone()))?;
    Ok(format!("#!/usr/bin/env {}\n{}", launcher.interpreter, rendered))
}

/// Write `contents` to a new executable temp file.
///
/// The file is removed when the returned path is dropped.
pub fn materialize(contents: &str, extension: &str) -> Result<TempPath> {
    let suffix = if extension.is_empty() { String::new() } else { format!(".{extension}") };
    let mut file = tempfile::Builder::new().prefix(SCRIPT_PREFIX).suffix(&suffix).tempfile()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o755))?;
    }

    file.write_all(contents.as_bytes())?;
    file.flush()?;

    // closes the handle so the script can be exec'd
    Ok(file.into_temp_path())
}

/// Spawn a script and wait for it, streaming its output.
fn run_script(path: &Path) -> std::result::Result<(), String> {
    tracing::debug!(script = ?path, "Running script");

    let status = ProcessCommand::new(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| format!("failed to spawn process: {e}"))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("process exited with {status}"))
    }
}
