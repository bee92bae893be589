//! Phase 1: Scanner
//!
//! The scanner converts raw source text into scan lines. It performs:
//! - BOM stripping (a single leading U+FEFF)
//! - Line splitting on `\n` and `\r\n`
//! - Blank line and full-line comment filtering
//! - Indentation counting (tabs in indentation are rejected)
//!
//! It also hosts the key/value splitter, which the builder applies to each
//! retained line.

use crate::error::{ParseContext, ParseError, Result};

/// A single retained line after the scanning phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLine<'a> {
    /// Content after the indentation.
    pub content: &'a str,
    /// Number of leading whitespace characters.
    pub indent: usize,
    /// One-based line number for error reporting.
    pub line_num: usize,
    /// The original line, without its line terminator.
    pub raw: &'a str,
}

/// Scan source text into retained lines.
pub fn scan<'a>(source: &'a str, ctx: &ParseContext) -> Result<Vec<ScanLine<'a>>> {
    let source = strip_bom(source);
    let mut lines = Vec::new();

    for (index, line_str) in source.split('\n').enumerate() {
        let raw = line_str.strip_suffix('\r').unwrap_or(line_str);
        let content = raw.trim_start();

        // Blank lines and full-line comments contribute nothing
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let line_num = index + 1;
        let leading = &raw[..raw.len() - content.len()];
        if leading.contains('\t') {
            return Err(ParseError::tab_indent(ctx, line_num, raw));
        }

        lines.push(ScanLine {
            content,
            indent: leading.chars().count(),
            line_num,
            raw,
        });
    }

    Ok(lines)
}

/// Remove one leading byte-order mark, if present.
fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{FEFF}').unwrap_or(source)
}

/// Split a retained line at its first colon into a trimmed key and the
/// untrimmed value text that follows the colon.
pub fn split_entry<'a>(line: &ScanLine<'a>, ctx: &ParseContext) -> Result<(&'a str, &'a str)> {
    match line.content.find(':') {
        Some(colon) if colon > 0 => {
            let key = line.content[..colon].trim();
            Ok((key, &line.content[colon + 1..]))
        }
        _ => Err(ParseError::syntax(ctx, line.line_num, line.raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_ok(source: &str) -> Vec<ScanLine<'_>> {
        scan(source, &ParseContext::new(None)).unwrap()
    }

    #[test]
    fn test_scan_simple() {
        let lines = scan_ok("name: value");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].content, "name: value");
        assert_eq!(lines[0].indent, 0);
        assert_eq!(lines[0].line_num, 1);
    }

    #[test]
    fn test_scan_indent() {
        let lines = scan_ok("a:\n  b: 1\n    c: 2");
        let indents: Vec<usize> = lines.iter().map(|l| l.indent).collect();
        assert_eq!(indents, vec![0, 2, 4]);
        assert_eq!(lines[2].content, "c: 2");
        assert_eq!(lines[2].raw, "    c: 2");
    }

    #[test]
    fn test_scan_skips_blank_and_comment_lines() {
        let lines = scan_ok("# header\n\n   \n  # indented comment\nkey: 1\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].content, "key: 1");
        assert_eq!(lines[0].line_num, 5);
    }

    #[test]
    fn test_scan_crlf() {
        let lines = scan_ok("a: 1\r\nb: 2\r\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].content, "a: 1");
        assert_eq!(lines[1].raw, "b: 2");
    }

    #[test]
    fn test_scan_strips_bom_once() {
        let lines = scan_ok("\u{FEFF}a: 1");
        assert_eq!(lines[0].content, "a: 1");
        assert_eq!(lines[0].indent, 0);

        let lines = scan_ok("\u{FEFF}\u{FEFF}a: 1");
        assert_eq!(lines[0].content, "\u{FEFF}a: 1");
    }

    #[test]
    fn test_inline_comment_is_content() {
        let lines = scan_ok("a: 1 # trailing");
        assert_eq!(lines[0].content, "a: 1 # trailing");
    }

    #[test]
    fn test_tab_error() {
        let err = scan("a:\n\tb: 1", &ParseContext::new(None)).unwrap_err();
        assert!(matches!(err, ParseError::TabIndent { line: 2, .. }));
    }

    #[test]
    fn test_tab_in_comment_or_value_is_allowed() {
        let lines = scan_ok("\t# comment\na: x\ty");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].content, "a: x\ty");
    }

    #[test]
    fn test_split_entry() {
        let ctx = ParseContext::new(None);
        let lines = scan_ok("  key one :  value ");
        let (key, value) = split_entry(&lines[0], &ctx).unwrap();
        assert_eq!(key, "key one");
        assert_eq!(value, "  value ");
    }

    #[test]
    fn test_split_entry_first_colon_wins() {
        let ctx = ParseContext::new(None);
        let lines = scan_ok("url: http://example.com:8080");
        let (key, value) = split_entry(&lines[0], &ctx).unwrap();
        assert_eq!(key, "url");
        assert_eq!(value, " http://example.com:8080");
    }

    #[test]
    fn test_split_entry_errors() {
        let ctx = ParseContext::new(None);
        for source in ["justtext", ": value", "  :"] {
            let lines = scan_ok(source);
            let err = split_entry(&lines[0], &ctx).unwrap_err();
            assert!(matches!(err, ParseError::Syntax { line: 1, .. }), "{source}");
            assert_eq!(err.text(), source);
        }
    }
}
