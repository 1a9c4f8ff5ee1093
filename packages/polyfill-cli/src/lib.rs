#![deny(clippy::all)]

/**
 * Scope Polyfill CLI
 *
 * Finds stylesheets on disk, polyfills their `@scope` blocks and writes the
 * generated CSS next to them (or into an output directory)
 */
// Re-export the core for convenience
pub use scope_polyfill as polyfill;

pub mod config;
pub mod discovery;
pub mod error;
pub mod inject;
pub mod logging;
pub mod session;
pub mod watch;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
