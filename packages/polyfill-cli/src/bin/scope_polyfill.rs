/**
 * Scope Polyfill CLI - scope-polyfill
 *
 * Main entry point for polyfilling `@scope` in stylesheets on disk
 */
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::mpsc;

use scope_polyfill_cli::config::{PolyfillConfig, CONFIG_FILE_NAME};
use scope_polyfill_cli::discovery::{read_stdin, SourceDiscovery};
use scope_polyfill_cli::logging::{ConsoleLogger, LogLevel};
use scope_polyfill_cli::session::PolyfillSession;
use scope_polyfill_cli::watch::{create_watcher, watch_loop, FileChangeEvent};

fn command() -> Command {
    Command::new("scope-polyfill")
        .version(scope_polyfill_cli::version())
        .about("Rewrites CSS @scope blocks into plain CSS")
        .arg(
            Arg::new("paths")
                .value_name("PATH")
                .num_args(0..)
                .help("Stylesheet paths or glob patterns, or - for stdin"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to scope-polyfill.json"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .help("Directory for generated stylesheets"),
        )
        .arg(
            Arg::new("suffix")
                .long("suffix")
                .value_name("SUFFIX")
                .help("Suffix of generated files (default .scoped.css)"),
        )
        .arg(
            Arg::new("watch")
                .short('w')
                .long("watch")
                .action(ArgAction::SetTrue)
                .help("Keep running and polyfill sources as they change"),
        )
        .arg(
            Arg::new("native")
                .long("native")
                .action(ArgAction::SetTrue)
                .help("Target engine supports @scope natively; do nothing"),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .action(ArgAction::SetTrue)
                .help("Print generated CSS instead of writing files"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .value_parser(["debug", "info", "warn", "error"])
                .help("Minimum level of log messages"),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<PolyfillConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => PolyfillConfig::load(Path::new(path))?,
        None => PolyfillConfig::load_or_default(Path::new(CONFIG_FILE_NAME))?,
    };

    let paths: Vec<String> = matches
        .get_many::<String>("paths")
        .map(|values| values.filter(|p| p.as_str() != "-").cloned().collect())
        .unwrap_or_default();
    if !paths.is_empty() {
        config.include = paths;
    }
    if let Some(out_dir) = matches.get_one::<String>("out-dir") {
        config.out_dir = Some(out_dir.clone());
    }
    if let Some(suffix) = matches.get_one::<String>("suffix") {
        config.suffix = suffix.clone();
    }
    if matches.get_flag("native") {
        config.native_scope = true;
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.log_level = level.parse::<LogLevel>()?;
    }
    config.validate()?;
    Ok(config)
}

fn run(matches: &ArgMatches) -> anyhow::Result<i32> {
    let config = load_config(matches)?;
    let to_stdout = matches.get_flag("stdout");
    let from_stdin = matches
        .get_many::<String>("paths")
        .is_some_and(|mut values| values.any(|p| p == "-"));

    let logger = ConsoleLogger::new(config.log_level);
    let mut session = PolyfillSession::new(&config, Box::new(logger), to_stdout);

    if from_stdin {
        let report = session.process_batch(vec![read_stdin()?]);
        return Ok(if report.failed > 0 { 1 } else { 0 });
    }

    let discovery = SourceDiscovery::new(&config.include, &config.exclude)?;
    let discovered = discovery.discover()?;
    for err in &discovered.errors {
        session.logger().warn(&format!("Skipping glob entry: {}", err));
    }
    let report = session.process_paths(&discovered.paths);
    session.logger().info(&report.summary());
    let mut failed = report.failed + discovered.errors.len();

    if matches.get_flag("watch") {
        let mut watcher = create_watcher(config.watch.strategy, discovery);
        if !watcher.is_active() {
            session
                .logger()
                .info("Watch strategy is \"none\", nothing to watch");
            return Ok(if failed > 0 { 1 } else { 0 });
        }
        for err in watcher.prime() {
            session.logger().warn(&format!("Skipping glob entry: {}", err));
        }

        let (tx, rx) = mpsc::channel::<Vec<PathBuf>>();
        watcher.register(Box::new(move |paths| {
            let _ = tx.send(paths.to_vec());
        }));

        session.logger().info("Watching for changes...");
        watch_loop(watcher.as_mut(), config.watch.interval(), None, |round| {
            for err in &round.errors {
                session.logger().warn(&format!("Watch round incomplete: {}", err));
            }
            for change in &round.changes {
                if let FileChangeEvent::Deleted(path) = change {
                    session.forget(path);
                }
            }
            while let Ok(paths) = rx.try_recv() {
                let report = session.process_paths(&paths);
                if report.transformed() > 0 || report.failed > 0 {
                    session.logger().info(&report.summary());
                }
                failed += report.failed;
            }
        });
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

fn main() {
    let matches = command().get_matches();
    match run(&matches) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}
