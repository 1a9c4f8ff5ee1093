//! Output Injection
//!
//! Writes polyfilled CSS where the page can pick it up, marked as generated
//! so discovery never feeds it back in.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::discovery::{GENERATED_MARKER, STDIN_ORIGIN};
use crate::error::{PolyfillError, Result};

/// Where one generated stylesheet went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Stdout,
}

#[derive(Debug, Clone)]
pub struct OutputWriter {
    out_dir: Option<PathBuf>,
    suffix: String,
    to_stdout: bool,
}

impl OutputWriter {
    pub fn new(out_dir: Option<PathBuf>, suffix: impl Into<String>, to_stdout: bool) -> Self {
        Self {
            out_dir,
            suffix: suffix.into(),
            to_stdout,
        }
    }

    /// `<out_dir or source dir>/<source stem><suffix>`, or stdout for stdin sources.
    pub fn destination_for(&self, origin: &str) -> Destination {
        if self.to_stdout || origin == STDIN_ORIGIN {
            return Destination::Stdout;
        }
        let source = Path::new(origin);
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "stylesheet".to_string());
        let dir = match &self.out_dir {
            Some(dir) => dir.clone(),
            None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        Destination::File(dir.join(format!("{}{}", stem, self.suffix)))
    }

    pub fn render(css: &str) -> String {
        format!("{}\n{}\n", GENERATED_MARKER, css)
    }

    pub fn write(&self, css: &str, origin: &str) -> Result<Destination> {
        let destination = self.destination_for(origin);
        let rendered = Self::render(css);
        match &destination {
            Destination::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(rendered.as_bytes())
                    .map_err(|e| PolyfillError::io(STDIN_ORIGIN, e))?;
            }
            Destination::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(|e| PolyfillError::io(parent, e))?;
                }
                fs::write(path, rendered).map_err(|e| PolyfillError::io(path, e))?;
            }
        }
        Ok(destination)
    }
}
