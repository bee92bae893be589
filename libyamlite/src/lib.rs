//! yamlite parser implementation.
//!
//! yamlite is the small subset of YAML that hand-written configuration files
//! actually use: nested mappings expressed by indentation, `key: value`
//! pairs, and scalars that coerce to strings, numbers, booleans, or null.
//! Lists, anchors, tags, flow collections, block scalars, and multiple
//! documents are not part of the subset.
//!
//! # Parsing Pipeline
//!
//! The parser operates in two phases:
//!
//! 1. **Scanner**: Converts source text into retained lines, stripping a BOM,
//!    dropping blank and comment lines, and measuring indentation.
//!
//! 2. **Builder**: Walks the lines once with a stack of indentation frames,
//!    splitting each line at its first colon and either opening a nested
//!    mapping or assigning a coerced scalar.
//!
//! Duplicate keys within one mapping overwrite the earlier value in place,
//! keeping the key's original position.

mod encode;
mod error;
mod load;
mod merge;
mod parser;
mod scalar;
mod scanner;
mod value;

pub use encode::{encode, EncodeError, Format};
pub use error::{LoadError, ParseError, Result};
pub use load::{load, load_or_default, Loaded, Source};
pub use merge::{merge, merge_mappings};
pub use value::{Mapping, Value};

/// Parse a yamlite document from a string.
///
/// # Example
///
/// ```
/// use libyamlite::{parse, Value};
///
/// let doc = parse("server:\n  port: 8080\n").unwrap();
/// assert_eq!(doc["server"].get("port"), Some(&Value::Number(8080.0)));
/// ```
pub fn parse(input: &str) -> Result<Mapping> {
    parse_with_filename(input, None)
}

/// Parse a yamlite document from a string with a filename for error messages.
pub fn parse_with_filename(input: &str, filename: Option<&str>) -> Result<Mapping> {
    let ctx = error::ParseContext::new(filename);

    // Phase 1: Scan source into lines
    let lines = scanner::scan(input, &ctx)?;

    // Phase 2: Build the mapping tree
    parser::build(&lines, &ctx)
}
