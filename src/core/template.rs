//! Positional argument templates.
//!
//! Code blocks reference caller arguments as `{{.arg1}}`, `{{.arg2}}`, ...
//! (the leading dot and inner whitespace are optional). Binding checks both
//! directions: every supplied argument must be used and every referenced
//! placeholder must be supplied. Substitution is literal, without quoting.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{MdxError, Result};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*\.?arg(\d+)\s*\}\}").expect("valid placeholder regex"));

static PLACEHOLDER_EXACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{\{\s*\.?arg(\d+)\s*\}\}$").expect("valid placeholder regex"));

/// Distinct argument indices referenced in `code`, ascending.
pub fn placeholders(code: &str) -> Result<BTreeSet<usize>> {
    PLACEHOLDER.captures_iter(code).map(|caps| parse_index(&caps[1])).collect()
}

/// Validate `args` against the placeholders in `code` and render it.
pub fn bind_arguments(code: &str, args: &[String]) -> Result<String> {
    let used = placeholders(code)?;

    for (i, value) in args.iter().enumerate() {
        let position = i + 1;
        if !used.contains(&position) {
            return Err(MdxError::ArgProvidedButNotUsed { position, value: value.clone() });
        }
    }

    if let Some(&missing) = used.iter().find(|&&index| index == 0 || index > args.len()) {
        return Err(MdxError::ArgUsedInTemplateNotProvided(missing));
    }

    render(code, args)
}

fn render(code: &str, args: &[String]) -> Result<String> {
    let mut rendered = String::with_capacity(code.len());
    let mut rest = code;

    while let Some(open) = rest.find("{{") {
        rendered.push_str(&rest[..open]);
        let action = &rest[open..];
        let close = action
            .find("}}")
            .ok_or_else(|| MdxError::TemplateParseFailure("unclosed action".to_string()))?;
        let action = &action[..close + 2];

        let caps = PLACEHOLDER_EXACT.captures(action).ok_or_else(|| {
            MdxError::TemplateParseFailure(format!("unsupported action '{action}'"))
        })?;
        let index = parse_index(&caps[1])?;
        let value = index
            .checked_sub(1)
            .and_then(|i| args.get(i))
            .ok_or(MdxError::ArgUsedInTemplateNotProvided(index))?;
        rendered.push_str(value);

        rest = &rest[open + action.len()..];
    }
    rendered.push_str(rest);

    Ok(rendered)
}

fn parse_index(digits: &str) -> Result<usize> {
    digits.parse().map_err(|_| {
        MdxError::TemplateParseFailure(format!("argument index out of range: {digits}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_two_arguments() {
        let rendered = bind_arguments("{{.arg1}} {{.arg2}}", &args(&["a", "b"])).unwrap();
        assert_eq!(rendered, "a b");
    }

    #[test]
    fn test_dotless_and_spaced_placeholders() {
        let rendered = bind_arguments("{{arg1}}-{{ .arg2 }}-{{  arg1}}", &args(&["x", "y"])).unwrap();
        assert_eq!(rendered, "x-y-x");
    }

    #[test]
    fn test_no_placeholders_no_args() {
        let code = "echo hello\n";
        assert_eq!(bind_arguments(code, &[]).unwrap(), code);
    }

    #[test]
    fn test_extra_argument() {
        let err = bind_arguments("{{.arg1}} {{.arg2}}", &args(&["a", "b", "c"])).unwrap_err();
        match err {
            MdxError::ArgProvidedButNotUsed { position, value } => {
                assert_eq!(position, 3);
                assert_eq!(value, "c");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_argument() {
        let err = bind_arguments("echo {{.arg1}}", &[]).unwrap_err();
        assert!(matches!(err, MdxError::ArgUsedInTemplateNotProvided(1)));
    }

    #[test]
    fn test_gap_in_placeholders() {
        // arg2 supplied but only arg1 and arg3 referenced
        let err = bind_arguments("{{.arg1}} {{.arg3}}", &args(&["a", "b"])).unwrap_err();
        assert!(matches!(err, MdxError::ArgProvidedButNotUsed { position: 2, .. }));

        let err = bind_arguments("{{.arg1}} {{.arg3}}", &args(&["a"])).unwrap_err();
        assert!(matches!(err, MdxError::ArgUsedInTemplateNotProvided(3)));
    }

    #[test]
    fn test_arg_zero_is_never_provided() {
        let err = bind_arguments("{{.arg0}}", &[]).unwrap_err();
        assert!(matches!(err, MdxError::ArgUsedInTemplateNotProvided(0)));
    }

    #[test]
    fn test_repeated_placeholder_counts_once() {
        let used = placeholders("{{.arg1}} {{.arg1}} {{.arg2}}").unwrap();
        assert_eq!(used.into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_no_quoting_applied() {
        let rendered = bind_arguments("echo {{.arg1}}", &args(&["$(whoami); rm x"])).unwrap();
        assert_eq!(rendered, "echo $(whoami); rm x");
    }

    #[test]
    fn test_argument_containing_braces_is_not_reparsed() {
        let rendered = bind_arguments("echo {{.arg1}}", &args(&["{{.arg2}}"])).unwrap();
        assert_eq!(rendered, "echo {{.arg2}}");
    }

    #[test]
    fn test_unclosed_action_with_argument_is_unused() {
        let err = bind_arguments(r#"echo "Hello, {{.arg1""#, &args(&["World"])).unwrap_err();
        assert!(matches!(err, MdxError::ArgProvidedButNotUsed { position: 1, .. }));
    }

    #[test]
    fn test_unclosed_action() {
        let err = bind_arguments(r#"echo "Hello, {{.arg1""#, &[]).unwrap_err();
        assert!(matches!(err, MdxError::TemplateParseFailure(_)));
    }

    #[test]
    fn test_unsupported_action() {
        let err = bind_arguments("echo {{ .name }}", &[]).unwrap_err();
        assert!(matches!(err, MdxError::TemplateParseFailure(ref msg) if msg.contains(".name")));
    }
}
