use std::path::Path;

use flatfile_db::Storage;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::display::OutputMode;
use crate::{LineOutcome, run_line};

const PROMPT: &str = "flatdb> ";

/// Run the interactive shell until `exit`, Ctrl-C or Ctrl-D.
///
/// Failed commands are reported and the loop continues.
pub fn run(storage: &Storage, history: Option<&Path>, mode: &OutputMode) -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    if let Some(path) = history {
        if path.exists() {
            load_history(&mut editor, path);
        }
    }

    println!("flatdb {}", env!("CARGO_PKG_VERSION"));
    println!("Type help for the list of commands, exit to quit.\n");

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                if let LineOutcome::Exit = run_line(storage, &line, mode) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("Bye.");
                break;
            }
            Err(e) => {
                eprintln!("error: {e}");
                break;
            }
        }
    }

    if let Some(path) = history {
        if let Err(e) = editor.save_history(path) {
            debug!(path = %path.display(), error = %e, "Failed to save history");
        }
    }
    Ok(())
}

/// Loads `path` into the editor history. Returns `false` if it could not be read.
fn load_history(editor: &mut DefaultEditor, path: &Path) -> bool {
    match editor.load_history(path) {
        Ok(()) => true,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Failed to load history");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_history_reads_saved_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        std::fs::write(&path, "list_tables\nhelp\n").unwrap();

        let mut editor = DefaultEditor::new().unwrap();
        assert!(load_history(&mut editor, &path));
    }

    #[test]
    fn test_load_history_tolerates_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();

        let mut editor = DefaultEditor::new().unwrap();
        assert!(!load_history(&mut editor, dir.path()));
    }
}
