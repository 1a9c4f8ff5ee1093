//! Source Discovery
//!
//! Supplies candidate stylesheet texts, labeled with their origin path.

use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use scope_polyfill::StylesheetText;

use crate::error::{PolyfillError, Result};

/// First line of every generated file. Sources starting with it are never
/// fed back into the polyfill.
pub const GENERATED_MARKER: &str = "/* @scope-polyfill generated */";

/// Origin label used for stylesheets read from stdin.
pub const STDIN_ORIGIN: &str = "<stdin>";

pub fn is_generated(css_text: &str) -> bool {
    css_text.trim_start().starts_with(GENERATED_MARKER)
}

/// Result of one discovery pass.
#[derive(Debug, Default)]
pub struct Discovered {
    pub paths: Vec<PathBuf>,
    /// Glob entries that could not be read; the walk went on without them.
    pub errors: Vec<PolyfillError>,
}

impl Discovered {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Expands include globs (minus excludes) into stylesheet paths.
#[derive(Debug, Clone)]
pub struct SourceDiscovery {
    include: Vec<String>,
    exclude: Vec<Pattern>,
}

impl SourceDiscovery {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        let exclude = exclude
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| PolyfillError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            include: include.to_vec(),
            exclude,
        })
    }

    /// Every matching file, sorted and deduplicated.
    ///
    /// Only a malformed include pattern fails the whole pass. Entries the
    /// walk cannot read are collected in [`Discovered::errors`].
    pub fn discover(&self) -> Result<Discovered> {
        let mut paths = BTreeSet::new();
        let mut errors = Vec::new();
        for pattern in &self.include {
            let entries = glob::glob(pattern).map_err(|source| PolyfillError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            self.collect_entries(entries, &mut paths, &mut errors);
        }
        Ok(Discovered {
            paths: paths.into_iter().collect(),
            errors,
        })
    }

    fn collect_entries<I, E>(
        &self,
        entries: I,
        paths: &mut BTreeSet<PathBuf>,
        errors: &mut Vec<PolyfillError>,
    ) where
        I: IntoIterator<Item = std::result::Result<PathBuf, E>>,
        E: Into<PolyfillError>,
    {
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() && !self.is_excluded(&path) => {
                    paths.insert(path);
                }
                Ok(_) => {}
                Err(err) => errors.push(err.into()),
            }
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.iter().any(|pattern| pattern.matches_path(path))
    }
}

/// Read one source. `Ok(None)` means the file is generated output.
pub fn read_source(path: &Path) -> Result<Option<StylesheetText>> {
    let text = fs::read_to_string(path).map_err(|e| PolyfillError::io(path, e))?;
    if is_generated(&text) {
        return Ok(None);
    }
    Ok(Some(StylesheetText::new(text, path.to_string_lossy())))
}

pub fn read_stdin() -> Result<StylesheetText> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| PolyfillError::io(STDIN_ORIGIN, e))?;
    Ok(StylesheetText::new(text, STDIN_ORIGIN))
}
