//! Phase 2: Indentation-Stack Builder
//!
//! The builder consumes scan lines in order and attaches each entry to the
//! mapping at the top of a frame stack. It handles:
//! - Dedent: frames whose indentation is `>=` the line's are popped
//! - Nesting: an empty value opens a child mapping and pushes its frame
//! - Scalars: any other value is coerced and assigned
//!
//! Frames do not own their mappings. A frame records the position of its
//! mapping within the parent, and the top mapping is re-resolved from the
//! root for every line, so the tree always has exactly one owner.

use crate::error::{ParseContext, ParseError, Result};
use crate::scalar::coerce;
use crate::scanner::{split_entry, ScanLine};
use crate::value::{Mapping, Value};

/// What a line contributes to its parent mapping.
#[derive(Debug, PartialEq)]
enum Entry {
    /// Empty value: the line opens a child mapping.
    Nested,
    /// Any other value.
    Scalar(Value),
}

impl Entry {
    fn from_value_text(text: &str) -> Self {
        if text.trim().is_empty() {
            Entry::Nested
        } else {
            Entry::Scalar(coerce(text))
        }
    }
}

/// A stack entry. The root frame has indentation -1 and no slot.
#[derive(Debug, Clone, Copy)]
struct Frame {
    indent: isize,
    /// Index of this frame's mapping within the parent frame's mapping.
    slot: Option<usize>,
}

impl Frame {
    const ROOT: Frame = Frame {
        indent: -1,
        slot: None,
    };
}

/// Build the root mapping from scan lines.
pub fn build(lines: &[ScanLine<'_>], ctx: &ParseContext) -> Result<Mapping> {
    let mut root = Mapping::new();
    let mut stack = vec![Frame::ROOT];

    for line in lines {
        let indent = line.indent as isize;

        // Pop back to the frame this line belongs to
        while stack.len() > 1 && stack.last().map_or(false, |top| top.indent >= indent) {
            stack.pop();
        }

        let parent = resolve(&mut root, &stack)
            .ok_or_else(|| ParseError::structure(ctx, line.line_num, line.raw))?;

        let (key, value_text) = split_entry(line, ctx)?;
        log::trace!("line {}: indent {} key {:?}", line.line_num, indent, key);

        match Entry::from_value_text(value_text) {
            Entry::Nested => {
                let (slot, _) = parent.insert_full(key.to_string(), Value::Mapping(Mapping::new()));
                stack.push(Frame {
                    indent,
                    slot: Some(slot),
                });
            }
            Entry::Scalar(value) => {
                parent.insert(key.to_string(), value);
            }
        }
    }

    log::debug!(
        "built {} root entries from {} lines",
        root.len(),
        lines.len()
    );
    Ok(root)
}

/// Walk from the root through each frame's slot to the mapping at the top of
/// the stack.
fn resolve<'m>(root: &'m mut Mapping, stack: &[Frame]) -> Option<&'m mut Mapping> {
    let mut current = root;
    for frame in stack.iter().skip(1) {
        match current.get_index_mut(frame.slot?) {
            Some((_, Value::Mapping(child))) => current = child,
            _ => return None,
        }
    }
    Some(current)
}
