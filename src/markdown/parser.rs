//! Markdown command parser.
//!
//! The document is reduced to its top-level blocks. Command headings start a
//! command; every fenced code block after it, up to the next heading of any
//! kind, becomes one of the command's code blocks.

use std::path::Path;

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};

use super::CommandHeading;
use crate::core::{CodeBlock, CommandBlock, CommandRegistry};
use crate::error::{MdxError, Result};

/// A top-level markdown block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading that declares a command
    CommandHeading(CommandHeading),

    /// Any other heading
    Heading(String),

    /// Fenced code block
    FencedCode {
        /// First word of the infostring
        lang: String,
        /// Fence content
        code: String,
    },

    /// Paragraphs, lists, indented code, quotes, rules, html
    Other,
}

/// Split `source` into its top-level blocks, in document order.
pub fn parse_blocks(source: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut fence: Option<(String, String)> = None;

    for (event, range) in Parser::new(source).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    match tag {
                        Tag::Heading { .. } => blocks.push(heading_block(&source[range])),
                        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
                            let lang = info.split_whitespace().next().unwrap_or("").to_string();
                            fence = Some((lang, String::new()));
                        }
                        _ => blocks.push(Block::Other),
                    }
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some((lang, code)) = fence.take() {
                        blocks.push(Block::FencedCode { lang, code });
                    }
                }
            }
            Event::Text(text) => {
                if let Some((_, code)) = fence.as_mut() {
                    code.push_str(&text);
                }
            }
            _ if depth == 0 => blocks.push(Block::Other),
            _ => {}
        }
    }

    blocks
}

fn heading_block(raw: &str) -> Block {
    match CommandHeading::recognize(raw) {
        Some(heading) => Block::CommandHeading(heading),
        None => {
            tracing::debug!(heading = raw.trim(), "No command found in heading");
            Block::Heading(raw.trim().to_string())
        }
    }
}

/// Parse the commands declared in one markdown document.
///
/// `registry` is only consulted for duplicate names; nothing is inserted.
pub fn parse_commands(
    source: &str,
    file: &Path,
    registry: &CommandRegistry,
) -> Result<Vec<CommandBlock>> {
    let mut commands: Vec<CommandBlock> = Vec::new();
    let mut current: Option<CommandBlock> = None;

    for block in parse_blocks(source) {
        match block {
            Block::CommandHeading(heading) => {
                commands.extend(current.take());

                let first_defined = registry.defined_in(&heading.name).or_else(|| {
                    commands.iter().find(|c| c.name == heading.name).map(|_| file)
                });
                if let Some(first_defined) = first_defined {
                    return Err(MdxError::DuplicateCommand {
                        name: heading.name,
                        first_defined: first_defined.to_path_buf(),
                    });
                }

                tracing::debug!(
                    command = %heading.name,
                    dependencies = ?heading.dependencies,
                    "Found command heading"
                );
                current = Some(CommandBlock::new(heading.name, heading.dependencies, file));
            }
            Block::Heading(_) => commands.extend(current.take()),
            Block::FencedCode { lang, code } => match current.as_mut() {
                Some(command) => {
                    if let Some(block) = code_block(command, file, lang, code)? {
                        command.code_blocks.push(block);
                    }
                }
                None => tracing::debug!(lang = %lang, "Ignoring code block outside of a command"),
            },
            Block::Other => {}
        }
    }
    commands.extend(current.take());

    Ok(commands)
}

fn code_block(
    command: &CommandBlock,
    file: &Path,
    lang: String,
    code: String,
) -> Result<Option<CodeBlock>> {
    if code.is_empty() {
        tracing::warn!(
            "Empty code block found for command '{}' in '{}'.",
            command.name,
            file.display()
        );
        return Ok(None);
    }

    let block = CodeBlock::new(lang, code);

    if block.lang.is_empty() && !block.has_shebang {
        return Err(MdxError::NoInfostringOrShebang {
            command: command.name.clone(),
            file: file.to_path_buf(),
        });
    }

    if !block.lang.is_empty() && block.has_shebang {
        tracing::warn!(
            "Both language and shebang defined for command '{}' in '{}'. The shebang will be used!",
            command.name,
            file.display()
        );
    }

    tracing::debug!(command = %command.name, lang = %block.lang, "Collected code block");
    Ok(Some(block))
}

/// Load the commands of one markdown file into `registry`.
///
/// The file's commands are added only if the whole file parses.
pub fn load_file(path: &Path, registry: &mut CommandRegistry) -> Result<usize> {
    tracing::debug!(path = ?path, "Loading file");

    let source = std::fs::read_to_string(path)
        .map_err(|source| MdxError::Read { path: path.to_path_buf(), source })?;
    let commands = parse_commands(&source, path, registry)?;
    let count = commands.len();
    registry.insert_all(commands)?;

    Ok(count)
}

/// Load several files in order, stopping at the first error.
pub fn load_files<P: AsRef<Path>>(paths: &[P], registry: &mut CommandRegistry) -> Result<usize> {
    let mut total = 0;
    for path in paths {
        total += load_file(path.as_ref(), registry)?;
    }
    Ok(total)
}
