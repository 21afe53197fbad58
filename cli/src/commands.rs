use flatfile_core::{Filter, Value};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateTable {
        table: String,
        columns: Vec<String>,
    },
    DropTable {
        table: String,
    },
    ListTables,
    Insert {
        table: String,
        values: Vec<Value>,
    },
    Select {
        table: String,
        filter: Option<Filter>,
    },
    Update {
        table: String,
        assignments: Vec<(String, Value)>,
        filter: Filter,
    },
    Delete {
        table: String,
        filter: Filter,
    },
    Info {
        table: String,
    },
    Help,
    Exit,
}

pub const CREATE_TABLE_USAGE: &str = "create_table <table> <column:type> [<column:type> ...]";
pub const DROP_TABLE_USAGE: &str = "drop_table <table>";
pub const LIST_TABLES_USAGE: &str = "list_tables";
pub const INSERT_USAGE: &str = "insert into <table> values (<value1>, <value2>, ...)";
pub const SELECT_USAGE: &str = "select from <table> [where <column>=<value>]";
pub const UPDATE_USAGE: &str = "update <table> set <column>=<value> where <column>=<value>";
pub const DELETE_USAGE: &str = "delete from <table> where <column>=<value>";
pub const INFO_USAGE: &str = "info <table>";

/// Returns the help text listing every command.
pub fn help_text() -> String {
    let lines = [
        (CREATE_TABLE_USAGE, "create a table (types: int, str, bool)"),
        (DROP_TABLE_USAGE, "drop a table definition"),
        (LIST_TABLES_USAGE, "list all tables"),
        (INSERT_USAGE, "insert a record"),
        (SELECT_USAGE, "show records"),
        (UPDATE_USAGE, "change matching records"),
        (DELETE_USAGE, "remove matching records"),
        (INFO_USAGE, "show columns and record count"),
        ("help", "show this help"),
        ("exit", "leave the shell"),
    ];

    let mut out = String::from("Commands:\n");
    for (usage, desc) in lines {
        out.push_str(&format!("  {usage:<60} {desc}\n"));
    }
    out.push_str(
        "\nSeparate arguments with spaces. Quote names and values that contain spaces.\n\
         Several conditions or assignments can be joined with commas: where a=1, b=\"x\"",
    );
    out
}
