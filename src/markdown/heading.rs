//! Command heading recognition.
//!
//! A heading declares a command when its raw text contains a link-shaped
//! fragment `[name](dep1 dep2 ...)`. The link text is the command name and the
//! destination is a whitespace-separated dependency list. The raw heading text
//! is matched directly, so the fragment is never interpreted as a link.

use once_cell::sync::Lazy;
use regex::Regex;

static COMMAND_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]*)\)").expect("valid heading regex"));

/// A heading that declares a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandHeading {
    /// Command name (link text, trimmed)
    pub name: String,

    /// Dependency names (link destination, split on whitespace)
    pub dependencies: Vec<String>,
}

impl CommandHeading {
    /// Recognize a command declaration anywhere in `heading`.
    ///
    /// Returns `None` when there is no `[name](...)` fragment or the name is
    /// blank.
    pub fn recognize(heading: &str) -> Option<Self> {
        let caps = COMMAND_LINK.captures(heading)?;

        let name = caps[1].trim();
        if name.is_empty() {
            return None;
        }

        let dependencies = caps[2].split_whitespace().map(String::from).collect();
        Some(Self { name: name.to_string(), dependencies })
    }
}
