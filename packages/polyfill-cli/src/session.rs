//! Polyfill Session
//!
//! Owns everything that outlives a single polyfill call: which sources were
//! already processed, and whether the session hibernates because the target
//! engine supports `@scope` natively. Dropping the session drops that state.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use scope_polyfill::{ScopeCss, ScopeOutput, StylesheetText};
use xxhash_rust::xxh3::xxh3_64;

use crate::config::PolyfillConfig;
use crate::discovery::read_source;
use crate::error::{PolyfillError, Result};
use crate::inject::{Destination, OutputWriter};
use crate::logging::Logger;

/// Outcome counts for one batch of sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Destinations written, in source order.
    pub written: Vec<Destination>,
    /// Sources without any `@scope` block.
    pub no_match: usize,
    /// Sources identical to the last time they were processed.
    pub unchanged: usize,
    /// Generated files found among the sources.
    pub generated: usize,
    /// Sources skipped because the session hibernates.
    pub hibernated: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn transformed(&self) -> usize {
        self.written.len()
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.written.extend(other.written);
        self.no_match += other.no_match;
        self.unchanged += other.unchanged;
        self.generated += other.generated;
        self.hibernated += other.hibernated;
        self.failed += other.failed;
    }

    pub fn summary(&self) -> String {
        format!(
            "{} transformed, {} without @scope, {} unchanged, {} failed",
            self.transformed(),
            self.no_match,
            self.unchanged,
            self.failed
        )
    }
}

pub struct PolyfillSession {
    core: ScopeCss,
    writer: OutputWriter,
    logger: Box<dyn Logger>,
    /// origin -> hash of the text last processed for it
    seen: HashMap<String, u64>,
    /// output file -> origin that writes it
    owners: HashMap<PathBuf, String>,
    hibernating: bool,
}

impl PolyfillSession {
    pub fn new(config: &PolyfillConfig, logger: Box<dyn Logger>, to_stdout: bool) -> Self {
        let writer = OutputWriter::new(
            config.out_dir.as_ref().map(PathBuf::from),
            config.suffix.clone(),
            to_stdout,
        );
        if config.native_scope {
            logger.info("Native @scope support configured, polyfill is hibernating");
        }
        Self {
            core: ScopeCss::new(),
            writer,
            logger,
            seen: HashMap::new(),
            owners: HashMap::new(),
            hibernating: config.native_scope,
        }
    }

    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    pub fn is_hibernating(&self) -> bool {
        self.hibernating
    }

    /// Read `paths` and process them as one batch. Unreadable files are
    /// logged and counted, never fatal.
    pub fn process_paths(&mut self, paths: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::default();
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            match read_source(path) {
                Ok(Some(source)) => sources.push(source),
                Ok(None) => {
                    self.logger
                        .debug(&format!("Skipping generated file {}", path.display()));
                    report.generated += 1;
                }
                Err(err) => {
                    self.logger.warn(&format!("Skipping source: {}", err));
                    report.failed += 1;
                }
            }
        }
        report.merge(self.process_batch(sources));
        report
    }

    /// Polyfill independent stylesheets in parallel and write the results in
    /// input order.
    pub fn process_batch(&mut self, sources: Vec<StylesheetText>) -> BatchReport {
        let mut report = BatchReport::default();
        if self.hibernating {
            report.hibernated = sources.len();
            return report;
        }

        let mut fresh = Vec::with_capacity(sources.len());
        for source in sources {
            let hash = xxh3_64(source.text().as_bytes());
            if self.seen.get(source.origin()) == Some(&hash) {
                report.unchanged += 1;
            } else {
                fresh.push((source, hash));
            }
        }

        let core = self.core;
        let outputs: Vec<ScopeOutput> = fresh
            .par_iter()
            .map(|(source, _)| core.extract(source))
            .collect();

        for ((source, hash), output) in fresh.into_iter().zip(outputs) {
            let Some(css) = output.into_css() else {
                self.logger
                    .debug(&format!("No @scope block in {}", source.origin()));
                report.no_match += 1;
                self.seen.insert(source.origin().to_string(), hash);
                continue;
            };
            if let Err(err) = self.claim_destination(source.origin()) {
                self.logger.error(&err.to_string());
                report.failed += 1;
                continue;
            }
            match self.writer.write(&css, source.origin()) {
                Ok(destination) => {
                    if let Destination::File(path) = &destination {
                        self.logger.info(&format!(
                            "Polyfilled {} -> {}",
                            source.origin(),
                            path.display()
                        ));
                    }
                    report.written.push(destination);
                    self.seen.insert(source.origin().to_string(), hash);
                }
                Err(err) => {
                    self.logger.error(&err.to_string());
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Reserve the output file of `origin`. Each output file belongs to the
    /// first source that wrote it until that source is forgotten.
    fn claim_destination(&mut self, origin: &str) -> Result<()> {
        let Destination::File(path) = self.writer.destination_for(origin) else {
            return Ok(());
        };
        match self.owners.entry(path) {
            Entry::Occupied(entry) if entry.get() != origin => {
                Err(PolyfillError::DestinationConflict {
                    destination: entry.key().clone(),
                    owner: entry.get().clone(),
                    origin: origin.to_string(),
                })
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(origin.to_string());
                Ok(())
            }
        }
    }

    /// Drop what is known about a source, e.g. after it was deleted.
    pub fn forget(&mut self, origin: &Path) {
        let origin = origin.to_string_lossy();
        self.seen.remove(&*origin);
        self.owners.retain(|_, owner| *owner != *origin);
    }
}
