//! Error types for yamlite parsing and loading.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for yamlite parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying filename for error reporting.
#[derive(Clone, Debug)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages. `line` is 1-based.
    pub fn loc_suffix(&self, line: usize) -> String {
        match &self.filename {
            Some(name) => format!(" at {} of <{}>", line, name),
            None => format!(" at line {}", line),
        }
    }
}

/// Error type for yamlite parsing.
///
/// Every variant carries the 1-based line number and the original text of
/// the offending line, so hand-written files can be fixed without guessing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A line has no colon, or the colon is its first character.
    #[error("Invalid yamlite (expected `key:`){location}: {text}")]
    Syntax {
        line: usize,
        text: String,
        location: String,
    },

    /// The enclosing frame did not resolve to a mapping.
    #[error("Invalid yamlite nesting (parent is not a mapping){location}: {text}")]
    Structure {
        line: usize,
        text: String,
        location: String,
    },

    /// Tab character in the indentation of a line.
    #[error("Tab not allowed in indentation (use spaces){location}: {text}")]
    TabIndent {
        line: usize,
        text: String,
        location: String,
    },
}

impl ParseError {
    pub(crate) fn syntax(ctx: &ParseContext, line: usize, text: &str) -> Self {
        ParseError::Syntax {
            line,
            text: text.to_string(),
            location: ctx.loc_suffix(line),
        }
    }

    pub(crate) fn structure(ctx: &ParseContext, line: usize, text: &str) -> Self {
        ParseError::Structure {
            line,
            text: text.to_string(),
            location: ctx.loc_suffix(line),
        }
    }

    pub(crate) fn tab_indent(ctx: &ParseContext, line: usize, text: &str) -> Self {
        ParseError::TabIndent {
            line,
            text: text.to_string(),
            location: ctx.loc_suffix(line),
        }
    }

    /// The 1-based line number of the offending line.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Syntax { line, .. }
            | ParseError::Structure { line, .. }
            | ParseError::TabIndent { line, .. } => *line,
        }
    }

    /// The original, untrimmed text of the offending line.
    pub fn text(&self) -> &str {
        match self {
            ParseError::Syntax { text, .. }
            | ParseError::Structure { text, .. }
            | ParseError::TabIndent { text, .. } => text,
        }
    }
}

/// Error type for reading and parsing a document from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Config read failed ({})", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but is not valid yamlite.
    #[error("Config parse failed ({})", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}
