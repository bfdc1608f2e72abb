//! mdx - run markdown code blocks as named commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mdx::{App, Config};

/// Run the code blocks of a markdown runbook as named commands
#[derive(Parser)]
#[command(name = "mdx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Markdown file to load commands from
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// List available commands and exit
    #[arg(short, long)]
    list: bool,

    /// Output format for --list
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the scripts that would run without executing them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Command to run
    #[arg(required_unless_present = "list")]
    command: Option<String>,

    /// Arguments substituted for {{.arg1}}, {{.arg2}}, ... in the first code block
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env(cli.file.clone())?;

    // Setup logging
    let filter = EnvFilter::new(config.log_filter(cli.verbose));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::debug!(args = ?std::env::args().collect::<Vec<_>>(), "mdx started");

    let mut app = App::new(config);
    app.initialize().context("Error loading commands")?;

    if cli.list {
        return cmd_list(&app, cli.format);
    }

    // required by clap unless --list is given
    let Some(name) = cli.command.as_deref() else {
        anyhow::bail!("No command given");
    };

    app.run(name, &cli.args, cli.dry_run).context("Error executing command")?;
    Ok(())
}

/// List all loaded commands.
fn cmd_list(app: &App, format: Format) -> Result<()> {
    let commands = app.commands();

    match format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&commands)?;
            println!("{json}");
        }
        Format::Text => {
            for cmd in &commands {
                let deps = if cmd.dependencies.is_empty() {
                    String::new()
                } else {
                    format!(" <- {}", cmd.dependencies.join(" "))
                };
                println!(
                    "{}{} ({} block{}, {})",
                    cmd.name,
                    deps,
                    cmd.code_blocks.len(),
                    if cmd.code_blocks.len() == 1 { "" } else { "s" },
                    cmd.source_file.display()
                );
            }
            println!("\nTotal: {} commands", commands.len());
        }
    }

    Ok(())
}
