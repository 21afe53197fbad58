use flatfile_core::{Catalog, Record, create_table, drop_table, list_tables};
use flatfile_db::{Storage, StoreError, TableInfo, records};

use crate::commands::{Command, help_text};

/// The result of executing a command, ready for rendering.
#[derive(Debug)]
pub enum CommandResult {
    /// Plain status or listing text.
    Message(String),
    /// Records from a select, with the table's columns in schema order.
    Records {
        columns: Vec<String>,
        records: Vec<Record>,
    },
    Info(TableInfo),
    Help(String),
    Exit,
}

/// A command result plus how the catalog was loaded for it.
#[derive(Debug)]
pub struct Executed {
    pub result: CommandResult,
    /// The catalog document was unreadable and the command ran against an
    /// empty catalog.
    pub catalog_recovered: bool,
}

/// Execute one command against `storage`.
///
/// The catalog is reloaded from disk for every command and saved back only
/// after a successful schema change.
pub fn execute(storage: &Storage, command: Command) -> Result<Executed, StoreError> {
    let loaded = storage.load_catalog();
    let catalog_recovered = loaded.is_recovered();
    let mut catalog = loaded.into_inner();

    let result = dispatch(storage, &mut catalog, command)?;
    Ok(Executed {
        result,
        catalog_recovered,
    })
}

fn dispatch(
    storage: &Storage,
    catalog: &mut Catalog,
    command: Command,
) -> Result<CommandResult, StoreError> {
    match command {
        Command::CreateTable { table, columns } => {
            let message = create_table(catalog, &table, &columns)?;
            storage.save_catalog(catalog)?;
            Ok(CommandResult::Message(message))
        }

        Command::DropTable { table } => {
            let message = drop_table(catalog, &table)?;
            storage.save_catalog(catalog)?;
            Ok(CommandResult::Message(message))
        }

        Command::ListTables => Ok(CommandResult::Message(list_tables(catalog))),

        Command::Insert { table, values } => {
            let id = records::insert(storage, catalog, &table, &values)?;
            Ok(CommandResult::Message(format!(
                "Record with ID={id} inserted into \"{table}\"."
            )))
        }

        Command::Select { table, filter } => {
            let records = records::select(storage, catalog, &table, filter.as_ref())?;
            let columns = catalog
                .get(&table)
                .map(|schema| schema.column_names())
                .unwrap_or_default();
            Ok(CommandResult::Records { columns, records })
        }

        Command::Update {
            table,
            assignments,
            filter,
        } => {
            let matched = records::update(storage, catalog, &table, &assignments, &filter)?;
            Ok(CommandResult::Message(format!(
                "Updated {matched} record(s) in \"{table}\"."
            )))
        }

        Command::Delete { table, filter } => {
            let removed = records::delete(storage, catalog, &table, &filter)?;
            Ok(CommandResult::Message(format!(
                "Deleted {removed} record(s) from \"{table}\"."
            )))
        }

        Command::Info { table } => Ok(CommandResult::Info(records::info(storage, catalog, &table)?)),

        Command::Help => Ok(CommandResult::Help(help_text())),

        Command::Exit => Ok(CommandResult::Exit),
    }
}
