//! Command data structures.
//!
//! A `CommandBlock` is one markdown heading of the form `[name](deps)` together
//! with the fenced code blocks that follow it.

use std::path::PathBuf;

use serde::Serialize;

/// A fenced code block collected below a command heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Language tag from the fence infostring (may be empty)
    pub lang: String,

    /// Raw content of the fence
    pub code: String,

    /// Whether the code starts with `#!`
    pub has_shebang: bool,
}

impl CodeBlock {
    /// Create a code block, detecting a leading shebang.
    pub fn new(lang: impl Into<String>, code: impl Into<String>) -> Self {
        let code = code.into();
        let has_shebang = code.starts_with("#!");
        Self { lang: lang.into(), code, has_shebang }
    }
}

/// A named command declared by a markdown heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandBlock {
    /// Command name, unique across all loaded files
    pub name: String,

    /// Commands to run before this one, in order (duplicates kept)
    pub dependencies: Vec<String>,

    /// Code blocks in source order
    pub code_blocks: Vec<CodeBlock>,

    /// Markdown file the command was declared in
    pub source_file: PathBuf,
}

impl CommandBlock {
    /// Create a command with no code blocks yet.
    pub fn new(
        name: impl Into<String>,
        dependencies: Vec<String>,
        source_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            dependencies,
            code_blocks: Vec::new(),
            source_file: source_file.into(),
        }
    }

    /// Add a code block.
    #[must_use]
    pub fn with_code_block(mut self, block: CodeBlock) -> Self {
        self.code_blocks.push(block);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shebang_detection() {
        assert!(CodeBlock::new("", "#!/bin/sh\necho hi").has_shebang);
        assert!(CodeBlock::new("python", "#!/usr/bin/env python3\nprint(1)").has_shebang);
        assert!(!CodeBlock::new("sh", "echo '#!'").has_shebang);
        assert!(!CodeBlock::new("sh", " #!/bin/sh").has_shebang);
        assert!(!CodeBlock::new("sh", "#").has_shebang);
    }

    #[test]
    fn test_command_builder() {
        let cmd = CommandBlock::new("build", vec!["deps".to_string()], "README.md")
            .with_code_block(CodeBlock::new("sh", "make"));

        assert_eq!(cmd.name, "build");
        assert_eq!(cmd.dependencies, vec!["deps"]);
        assert_eq!(cmd.code_blocks.len(), 1);
        assert_eq!(cmd.source_file, PathBuf::from("README.md"));
    }
}
