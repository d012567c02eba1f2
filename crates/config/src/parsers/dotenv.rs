//! Key=value (`.env`) line parser.
//!
//! Grammar, one assignment per line:
//! - optional leading whitespace, a key of `[A-Za-z0-9_.-]`, `=`, the value;
//! - lines that do not match (comments, blanks, text without `=`) are skipped;
//! - a value wrapped in double quotes is unquoted and `\n` escapes become newlines;
//! - a value wrapped in single quotes is unquoted verbatim;
//! - any other value is trimmed;
//! - later duplicates overwrite earlier ones.

use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

use super::log_parse_failure;
use crate::error::ParseError;
use crate::log::DebugLog;
use crate::tree::ConfigTree;

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9_.-]+)\s*=\s*(.*)?\s*$").expect("key=value pattern is valid")
});

/// Parse a key=value file into a flat tree of strings.
///
/// Returns an empty tree if the file cannot be read.
pub fn parse_dotenv_file(path: &Path, log: &DebugLog) -> ConfigTree {
    let source = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(source) => {
            let e = ParseError::Read {
                path: path.to_path_buf(),
                source,
            };
            log_parse_failure(log, "parse_dotenv_file", path, &e);
            return ConfigTree::new();
        }
    };

    parse_dotenv_str(&String::from_utf8_lossy(&source), log)
}

/// Parse key=value text into a flat tree of strings.
pub fn parse_dotenv_str(source: &str, log: &DebugLog) -> ConfigTree {
    let mut tree = ConfigTree::new();
    let normalized = source.replace("\r\n", "\n");

    for (idx, line) in normalized.split(['\n', '\r']).enumerate() {
        let Some(captures) = KEY_VALUE.captures(line) else {
            log.log(
                "parse_dotenv_file",
                format_args!(
                    "did not match key and value when parsing line {}: {}",
                    idx + 1,
                    line
                ),
            );
            continue;
        };

        let key = &captures[1];
        let raw = captures.get(2).map_or("", |m| m.as_str());
        tree.insert(key.to_string(), Value::String(parse_value(raw)));
    }

    tree
}

fn parse_value(raw: &str) -> String {
    if let Some(inner) = unquote(raw, '"') {
        inner.replace("\\n", "\n")
    } else if let Some(inner) = unquote(raw, '\'') {
        inner.to_string()
    } else {
        raw.trim().to_string()
    }
}

/// Strip a matching pair of `quote` characters; a lone quote unquotes to "".
fn unquote(raw: &str, quote: char) -> Option<&str> {
    if !(raw.starts_with(quote) && raw.ends_with(quote)) {
        return None;
    }
    Some(raw.get(1..raw.len() - 1).unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::RecordingSink;
    use std::fs;
    use tempfile::TempDir;

    fn parse(source: &str) -> ConfigTree {
        parse_dotenv_str(source, &DebugLog::disabled())
    }

    fn get<'a>(tree: &'a ConfigTree, key: &str) -> &'a str {
        tree.get(key)
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("missing key {key}"))
    }

    #[test]
    fn test_basic_assignments() {
        let tree = parse("HOST=localhost\nPORT = 8080\n  db.name=app\nlog-level=info");

        assert_eq!(get(&tree, "HOST"), "localhost");
        assert_eq!(get(&tree, "PORT"), "8080");
        assert_eq!(get(&tree, "db.name"), "app");
        assert_eq!(get(&tree, "log-level"), "info");
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_double_quotes_expand_newlines() {
        let tree = parse(r#"KEY="a\nb""#);
        assert_eq!(get(&tree, "KEY"), "a\nb");
    }

    #[test]
    fn test_single_quotes_keep_escapes_literal() {
        let tree = parse(r"KEY='a\nb'");
        assert_eq!(get(&tree, "KEY"), "a\\nb");
        assert_eq!(get(&tree, "KEY").len(), 4);
    }

    #[test]
    fn test_quoted_values_keep_inner_whitespace() {
        let tree = parse("A=\"  padded  \"\nB='  padded  '\nC=   padded   ");

        assert_eq!(get(&tree, "A"), "  padded  ");
        assert_eq!(get(&tree, "B"), "  padded  ");
        assert_eq!(get(&tree, "C"), "padded");
    }

    #[test]
    fn test_mismatched_quotes_are_kept() {
        let tree = parse("A=\"open\nB='mixed\"");

        assert_eq!(get(&tree, "A"), "\"open");
        assert_eq!(get(&tree, "B"), "'mixed\"");
    }

    #[test]
    fn test_missing_value_defaults_to_empty() {
        let tree = parse("EMPTY=\nSPACES=   ");

        assert_eq!(get(&tree, "EMPTY"), "");
        assert_eq!(get(&tree, "SPACES"), "");
    }

    #[test]
    fn test_value_may_contain_equals() {
        let tree = parse("URL=postgres://u:p@h/db?sslmode=require");
        assert_eq!(get(&tree, "URL"), "postgres://u:p@h/db?sslmode=require");
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let tree = parse("MODE=first\nMODE=second");
        assert_eq!(get(&tree, "MODE"), "second");
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_all_line_endings_split() {
        let tree = parse("A=1\r\nB=2\rC=3\nD=4");

        assert_eq!(get(&tree, "A"), "1");
        assert_eq!(get(&tree, "B"), "2");
        assert_eq!(get(&tree, "C"), "3");
        assert_eq!(get(&tree, "D"), "4");
    }

    #[test]
    fn test_invalid_line_skipped_and_logged() {
        let sink = RecordingSink::shared();
        let log = DebugLog::new(true, Some(sink.clone()));

        let tree = parse_dotenv_str("GOOD=yes\nnot a valid line\n# comment=ignored", &log);

        assert_eq!(tree.len(), 1);
        assert_eq!(get(&tree, "GOOD"), "yes");
        let lines = sink.lines();
        assert!(
            lines.iter().any(|l| l
                == "parse_dotenv_file: did not match key and value when parsing line 2: not a valid line"),
            "expected skip notice, got {lines:?}"
        );
        assert!(lines.iter().any(|l| l.contains("line 3: # comment=ignored")));
    }

    #[test]
    fn test_invalid_line_silent_without_debug() {
        let sink = RecordingSink::shared();
        let tree = parse_dotenv_str(
            "not a valid line",
            &DebugLog::new(false, Some(sink.clone())),
        );

        assert!(tree.is_empty());
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn test_reads_file_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "NAME=\"enx\"\n").unwrap();

        let tree = parse_dotenv_file(&path, &DebugLog::disabled());

        assert_eq!(get(&tree, "NAME"), "enx");
    }

    #[test]
    fn test_missing_file_yields_empty_tree() {
        let dir = TempDir::new().unwrap();
        let sink = RecordingSink::shared();

        let tree = parse_dotenv_file(
            &dir.path().join(".env"),
            &DebugLog::new(true, Some(sink.clone())),
        );

        assert!(tree.is_empty());
        assert_eq!(
            sink.lines(),
            vec![format!(
                "parse_dotenv_file: no file at {}, skipping",
                dir.path().join(".env").display()
            )]
        );
    }
}
