use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use flatfile_db::{Storage, StoreConfig};
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod executor;
mod parser;
mod repl;

use display::OutputMode;
use executor::CommandResult;

/// flatdb: interactive and scriptable shell for a flat-file JSON record store.
#[derive(Parser, Debug)]
#[command(name = "flatdb", version)]
#[command(about = "Define tables and manage records stored as JSON documents")]
struct Cli {
    /// YAML configuration file (catalog_path, data_dir, history_file).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog document path; overrides the configuration file.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory of per-table record documents; overrides the configuration file.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Execute a command non-interactively (can be repeated).
    #[arg(short, long = "exec")]
    exec: Vec<String>,

    /// Output results as machine-parseable JSON.
    #[arg(short, long)]
    json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// What the caller should do after one input line.
pub(crate) enum LineOutcome {
    Continue,
    Failed,
    Exit,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    let storage = Storage::from_config(&config);
    tracing::debug!(
        catalog = %storage.catalog_path().display(),
        data_dir = %storage.data_dir().display(),
        "Opened store"
    );

    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Pretty
    };

    if !cli.exec.is_empty() {
        process::exit(run_exec_mode(&storage, &cli.exec, &mode));
    } else if !std::io::stdin().is_terminal() {
        process::exit(run_pipe_mode(&storage, &mode));
    } else if let Err(e) = repl::run(&storage, config.history_file.as_deref(), &mode) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> flatfile_db::Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::load(path)?,
        None => StoreConfig::default(),
    };
    if let Some(catalog) = &cli.catalog {
        config.catalog_path = catalog.clone();
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    Ok(config)
}

/// Parse, execute and render one input line.
pub(crate) fn run_line(storage: &Storage, line: &str, mode: &OutputMode) -> LineOutcome {
    let command = match parser::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return LineOutcome::Continue,
        Err(e) => {
            display::render_error(&e.to_string(), mode);
            return LineOutcome::Failed;
        }
    };

    match executor::execute(storage, command) {
        Ok(executed) => {
            display::render(&executed, mode);
            if matches!(executed.result, CommandResult::Exit) {
                LineOutcome::Exit
            } else {
                LineOutcome::Continue
            }
        }
        Err(e) => {
            display::render_error(&e.to_string(), mode);
            LineOutcome::Failed
        }
    }
}

/// Execute commands given with `--exec`.
///
/// Returns exit code: 0 = all succeeded, 1 = first error stops execution.
fn run_exec_mode(storage: &Storage, commands: &[String], mode: &OutputMode) -> i32 {
    for line in commands {
        match run_line(storage, line, mode) {
            LineOutcome::Continue => {}
            LineOutcome::Failed => return 1,
            LineOutcome::Exit => return 0,
        }
    }
    0
}

/// Read commands from stdin, one per line.
///
/// Every line runs even after a failure. Returns exit code: 0 = all
/// succeeded, 1 = at least one line failed.
fn run_pipe_mode(storage: &Storage, mode: &OutputMode) -> i32 {
    let mut code = 0;
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("error: failed to read stdin: {e}");
                return 1;
            }
        };
        match run_line(storage, &line, mode) {
            LineOutcome::Continue => {}
            LineOutcome::Failed => code = 1,
            LineOutcome::Exit => break,
        }
    }
    code
}
