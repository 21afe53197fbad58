use flatfile_core::Record;
use flatfile_db::TableInfo;
use serde_json::{Value, json};

use crate::executor::{CommandResult, Executed};

/// Output mode for rendering command results.
pub enum OutputMode {
    /// Human-readable text and tables.
    Pretty,
    /// One JSON object per result on stdout.
    Json,
}

/// Render a command result to stdout in the given mode.
///
/// In JSON mode a result computed against a recovered catalog carries
/// `"recovered": true`.
pub fn render(executed: &Executed, mode: &OutputMode) {
    let result = &executed.result;
    match mode {
        OutputMode::Pretty => match result {
            CommandResult::Message(msg) | CommandResult::Help(msg) => println!("{msg}"),
            CommandResult::Records { columns, records } => {
                println!("{}", format_records(columns, records))
            }
            CommandResult::Info(info) => println!("{info}"),
            CommandResult::Exit => println!("Bye."),
        },
        OutputMode::Json => {
            if let Some(value) = envelope(executed) {
                println!("{value}");
            }
        }
    }
}

/// Render an error in the given mode.
pub fn render_error(message: &str, mode: &OutputMode) {
    match mode {
        OutputMode::Pretty => eprintln!("Error: {message}"),
        OutputMode::Json => println!("{}", json!({"ok": false, "error": message})),
    }
}

fn envelope(executed: &Executed) -> Option<Value> {
    let mut value = to_json(&executed.result)?;
    if executed.catalog_recovered {
        if let Value::Object(map) = &mut value {
            map.insert("recovered".to_string(), Value::Bool(true));
        }
    }
    Some(value)
}

fn to_json(result: &CommandResult) -> Option<Value> {
    let value = match result {
        CommandResult::Message(msg) => json!({"ok": true, "message": msg}),
        CommandResult::Help(text) => json!({"ok": true, "help": text}),
        CommandResult::Records { records, .. } => json!({
            "ok": true,
            "count": records.len(),
            "records": records,
        }),
        CommandResult::Info(info) => info_json(info),
        CommandResult::Exit => return None,
    };
    Some(value)
}

fn info_json(info: &TableInfo) -> Value {
    let columns: Vec<Value> = info
        .columns
        .iter()
        .map(|(name, ty)| json!({"name": name, "type": ty}))
        .collect();
    json!({
        "ok": true,
        "table": info.name,
        "columns": columns,
        "records": info.record_count,
    })
}

/// Format records as a bordered text table with one column per schema column.
pub fn format_records(columns: &[String], records: &[Record]) -> String {
    if records.is_empty() {
        return "No records found.".to_string();
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| record.get(c).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let line = |cells: &[String]| {
        let inner = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!(" {cell:<w$} "))
            .collect::<Vec<_>>()
            .join("|");
        format!("|{inner}|")
    };

    let mut out = Vec::with_capacity(rows.len() + 4);
    out.push(border.clone());
    out.push(line(columns));
    out.push(border.clone());
    for row in &rows {
        out.push(line(row));
    }
    out.push(border);
    out.join("\n")
}
