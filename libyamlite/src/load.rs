//! Loading documents from disk over a tree of defaults.
//!
//! [`load`] is strict and reports why a document could not be used.
//! [`load_or_default`] never fails: a missing, unreadable, or malformed file
//! yields the defaults unchanged together with a warning.

use crate::error::LoadError;
use crate::merge::merge_mappings;
use crate::parse_with_filename;
use crate::value::Mapping;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The file was read, parsed, and merged over the defaults.
    File(PathBuf),
    /// The defaults were used as-is.
    Defaults,
}

/// The outcome of [`load_or_default`].
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub config: Mapping,
    pub source: Source,
    /// Why the defaults were used, when they were.
    pub warning: Option<String>,
}

/// Read and parse `path`, then merge it over `defaults`.
pub fn load(path: impl AsRef<Path>, defaults: &Mapping) -> Result<Mapping, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let filename = path.file_name().map(|n| n.to_string_lossy().into_owned());
    let parsed =
        parse_with_filename(&text, filename.as_deref()).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(merge_mappings(defaults.clone(), parsed))
}

/// Like [`load`], but falls back to `defaults` on any failure.
pub fn load_or_default(path: impl AsRef<Path>, defaults: &Mapping) -> Loaded {
    let path = path.as_ref();
    match load(path, defaults) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            Loaded {
                config,
                source: Source::File(path.to_path_buf()),
                warning: None,
            }
        }
        Err(e) => {
            let cause: &dyn fmt::Display = match &e {
                LoadError::Read { source, .. } => source,
                LoadError::Parse { source, .. } => source,
            };
            let warning = format!("{}: {}. Using defaults.", e, cause);
            log::warn!("{}", warning);
            Loaded {
                config: defaults.clone(),
                source: Source::Defaults,
                warning: Some(warning),
            }
        }
    }
}
