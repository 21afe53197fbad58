use flatfile_core::{Filter, Value};
use thiserror::Error;

use crate::commands::{
    CREATE_TABLE_USAGE, Command, DELETE_USAGE, DROP_TABLE_USAGE, INFO_USAGE, INSERT_USAGE,
    LIST_TABLES_USAGE, SELECT_USAGE, UPDATE_USAGE,
};

/// Errors raised while turning an input line into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unterminated quote in input")]
    UnterminatedQuote,
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("malformed clause '{0}': expected <column>=<value>")]
    MalformedClause(String),
    #[error("malformed value list '{0}': expected (<value1>, <value2>, ...)")]
    MalformedValues(String),
    #[error("no such command '{0}'. Type help for the list of commands")]
    UnknownCommand(String),
}

/// Tokenize an input line into whitespace-separated tokens.
///
/// Text inside `"..."` or `'...'` is kept together with its quotes, so
/// `"Ann Lee"` stays one token and value validation can still see that it
/// was quoted. Quotes may start mid-token (`name="Ann Lee"`).
fn tokenize(input: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                current.push(c);
            }
        }
    }

    if quote.is_some() {
        return Err(ParseError::UnterminatedQuote);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Byte offsets of `target` outside `"..."`/`'...'` quotes.
fn unquoted_indices(text: &str, target: char) -> Vec<usize> {
    let mut found = Vec::new();
    let mut quote: Option<char> = None;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == target => found.push(i),
            None => {}
        }
    }
    found
}

/// Split `text` on `sep`, ignoring separators inside quotes.
fn split_unquoted(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for i in unquoted_indices(text, sep) {
        parts.push(&text[start..i]);
        start = i + sep.len_utf8();
    }
    parts.push(&text[start..]);
    parts
}

/// Strip one layer of matching quotes from an identifier.
fn unquote(token: &str) -> String {
    for q in ['"', '\''] {
        if token.len() >= 2 && token.starts_with(q) && token.ends_with(q) {
            return token[1..token.len() - 1].to_string();
        }
    }
    token.to_string()
}

fn keyword(token: Option<&String>, expected: &str) -> bool {
    token.is_some_and(|t| t.eq_ignore_ascii_case(expected))
}

/// Parse `col=value[, col=value ...]` into raw `(column, value)` pairs.
///
/// Values are kept as typed text, quotes included; the engine coerces them to
/// the column's declared type.
fn parse_pairs(text: &str) -> Result<Vec<(String, Value)>, ParseError> {
    let mut pairs = Vec::new();
    for part in split_unquoted(text, ',') {
        let part = part.trim();
        let Some(&eq) = unquoted_indices(part, '=').first() else {
            return Err(ParseError::MalformedClause(part.to_string()));
        };
        let column = unquote(part[..eq].trim());
        let value = part[eq + 1..].trim();
        if column.is_empty() || value.is_empty() {
            return Err(ParseError::MalformedClause(part.to_string()));
        }
        pairs.push((column, Value::from(value)));
    }
    Ok(pairs)
}

/// Parse `(<v1>, <v2>, ...)` into raw values.
fn parse_values(text: &str) -> Result<Vec<Value>, ParseError> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ParseError::MalformedValues(trimmed.to_string()))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    split_unquoted(inner, ',')
        .into_iter()
        .map(|v| {
            let v = v.trim();
            if v.is_empty() {
                Err(ParseError::MalformedValues(trimmed.to_string()))
            } else {
                Ok(Value::from(v))
            }
        })
        .collect()
}

/// Parse one input line.
///
/// Returns `Ok(None)` for a blank line.
pub fn parse(input: &str) -> Result<Option<Command>, ParseError> {
    let tokens = tokenize(input)?;
    let Some(first) = tokens.first() else {
        return Ok(None);
    };

    let command = match first.to_lowercase().as_str() {
        "exit" | "quit" => Command::Exit,
        "help" => Command::Help,
        "list_tables" => {
            if tokens.len() != 1 {
                return Err(ParseError::Usage(LIST_TABLES_USAGE));
            }
            Command::ListTables
        }
        "create_table" => {
            if tokens.len() < 3 {
                return Err(ParseError::Usage(CREATE_TABLE_USAGE));
            }
            Command::CreateTable {
                table: unquote(&tokens[1]),
                columns: tokens[2..].iter().map(|t| unquote(t)).collect(),
            }
        }
        "drop_table" => {
            if tokens.len() != 2 {
                return Err(ParseError::Usage(DROP_TABLE_USAGE));
            }
            Command::DropTable {
                table: unquote(&tokens[1]),
            }
        }
        "info" => {
            if tokens.len() != 2 {
                return Err(ParseError::Usage(INFO_USAGE));
            }
            Command::Info {
                table: unquote(&tokens[1]),
            }
        }
        "insert" => parse_insert(&tokens)?,
        "select" => parse_select(&tokens)?,
        "update" => parse_update(&tokens)?,
        "delete" => parse_delete(&tokens)?,
        _ => return Err(ParseError::UnknownCommand(first.clone())),
    };

    Ok(Some(command))
}

fn parse_insert(tokens: &[String]) -> Result<Command, ParseError> {
    if tokens.len() < 5 || !keyword(tokens.get(1), "into") || !keyword(tokens.get(3), "values") {
        return Err(ParseError::Usage(INSERT_USAGE));
    }
    Ok(Command::Insert {
        table: unquote(&tokens[2]),
        values: parse_values(&tokens[4..].join(" "))?,
    })
}

fn parse_select(tokens: &[String]) -> Result<Command, ParseError> {
    if tokens.len() < 3 || !keyword(tokens.get(1), "from") {
        return Err(ParseError::Usage(SELECT_USAGE));
    }
    let table = unquote(&tokens[2]);
    if tokens.len() == 3 {
        return Ok(Command::Select { table, filter: None });
    }
    if tokens.len() < 5 || !keyword(tokens.get(3), "where") {
        return Err(ParseError::Usage(SELECT_USAGE));
    }
    let filter: Filter = parse_pairs(&tokens[4..].join(" "))?.into_iter().collect();
    Ok(Command::Select {
        table,
        filter: Some(filter),
    })
}

fn parse_update(tokens: &[String]) -> Result<Command, ParseError> {
    if tokens.len() < 6 || !keyword(tokens.get(2), "set") {
        return Err(ParseError::Usage(UPDATE_USAGE));
    }
    let Some(where_at) = (3..tokens.len()).find(|&i| keyword(tokens.get(i), "where")) else {
        return Err(ParseError::Usage(UPDATE_USAGE));
    };
    if where_at == 3 || where_at + 1 == tokens.len() {
        return Err(ParseError::Usage(UPDATE_USAGE));
    }

    let assignments = parse_pairs(&tokens[3..where_at].join(" "))?;
    let filter: Filter = parse_pairs(&tokens[where_at + 1..].join(" "))?
        .into_iter()
        .collect();
    Ok(Command::Update {
        table: unquote(&tokens[1]),
        assignments,
        filter,
    })
}

fn parse_delete(tokens: &[String]) -> Result<Command, ParseError> {
    if tokens.len() < 5 || !keyword(tokens.get(1), "from") || !keyword(tokens.get(3), "where") {
        return Err(ParseError::Usage(DELETE_USAGE));
    }
    let filter: Filter = parse_pairs(&tokens[4..].join(" "))?.into_iter().collect();
    Ok(Command::Delete {
        table: unquote(&tokens[2]),
        filter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn test_tokenize_keeps_quoted_groups() {
        let tokens = tokenize(r#"insert into users values ("Ann Lee", 30)"#).unwrap();
        assert_eq!(
            tokens,
            vec!["insert", "into", "users", "values", "(\"Ann Lee\",", "30)"]
        );
        let tokens = tokenize("where name='a b'   x").unwrap();
        assert_eq!(tokens, vec!["where", "name='a b'", "x"]);
        assert_eq!(tokenize("say \"hi").unwrap_err(), ParseError::UnterminatedQuote);
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_create_table() {
        let cmd = parse("create_table users name:str age:int").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::CreateTable {
                table: "users".into(),
                columns: vec!["name:str".into(), "age:int".into()],
            }
        );
        let cmd = parse("CREATE_TABLE \"my table\" 'full name:str'").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::CreateTable {
                table: "my table".into(),
                columns: vec!["full name:str".into()],
            }
        );
        assert_eq!(
            parse("create_table users").unwrap_err(),
            ParseError::Usage(CREATE_TABLE_USAGE)
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("list_tables").unwrap(), Some(Command::ListTables));
        assert_eq!(parse("help").unwrap(), Some(Command::Help));
        assert_eq!(parse("EXIT").unwrap(), Some(Command::Exit));
        assert_eq!(
            parse("drop_table users").unwrap(),
            Some(Command::DropTable { table: "users".into() })
        );
        assert_eq!(
            parse("info users").unwrap(),
            Some(Command::Info { table: "users".into() })
        );
        assert_eq!(parse("drop_table a b").unwrap_err(), ParseError::Usage(DROP_TABLE_USAGE));
        assert_eq!(parse("list_tables x").unwrap_err(), ParseError::Usage(LIST_TABLES_USAGE));
        assert_eq!(parse("info").unwrap_err(), ParseError::Usage(INFO_USAGE));
    }

    #[test]
    fn test_parse_insert() {
        let cmd = parse(r#"insert into users values ("Ann, Jr.", 30, yes)"#).unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Insert {
                table: "users".into(),
                values: vec![text("\"Ann, Jr.\""), text("30"), text("yes")],
            }
        );
        let cmd = parse("insert into users values ()").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Insert {
                table: "users".into(),
                values: vec![],
            }
        );
        assert_eq!(
            parse("insert users values (1)").unwrap_err(),
            ParseError::Usage(INSERT_USAGE)
        );
        assert!(matches!(
            parse("insert into users values 1, 2").unwrap_err(),
            ParseError::MalformedValues(_)
        ));
        assert!(matches!(
            parse("insert into users values (1,,2)").unwrap_err(),
            ParseError::MalformedValues(_)
        ));
    }

    #[test]
    fn test_parse_select() {
        assert_eq!(
            parse("select from users").unwrap(),
            Some(Command::Select {
                table: "users".into(),
                filter: None
            })
        );
        let cmd = parse(r#"select from users where name = "Ann Lee""#).unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Select {
                table: "users".into(),
                filter: Some(Filter::new().with("name", "\"Ann Lee\"")),
            }
        );
        let cmd = parse("select from users where age=30, active=yes").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Select {
                table: "users".into(),
                filter: Some(Filter::new().with("age", "30").with("active", "yes")),
            }
        );
        assert_eq!(
            parse("select users").unwrap_err(),
            ParseError::Usage(SELECT_USAGE)
        );
        assert_eq!(
            parse("select from users where").unwrap_err(),
            ParseError::Usage(SELECT_USAGE)
        );
        assert!(matches!(
            parse("select from users where age").unwrap_err(),
            ParseError::MalformedClause(_)
        ));
    }

    #[test]
    fn test_parse_update() {
        let cmd = parse(r#"update users set age=31 where name="Ann""#).unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Update {
                table: "users".into(),
                assignments: vec![("age".into(), text("31"))],
                filter: Filter::new().with("name", "\"Ann\""),
            }
        );
        let cmd = parse("update users set a=1, b='x=y' where ID=2").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Update {
                table: "users".into(),
                assignments: vec![("a".into(), text("1")), ("b".into(), text("'x=y'"))],
                filter: Filter::new().with("ID", "2"),
            }
        );
        assert_eq!(
            parse("update users set age=31").unwrap_err(),
            ParseError::Usage(UPDATE_USAGE)
        );
        assert_eq!(
            parse("update users age=31 where ID=1").unwrap_err(),
            ParseError::Usage(UPDATE_USAGE)
        );
        assert_eq!(
            parse("update users set where ID=1 x").unwrap_err(),
            ParseError::Usage(UPDATE_USAGE)
        );
    }

    #[test]
    fn test_parse_delete() {
        let cmd = parse("delete from users where ID=2").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Delete {
                table: "users".into(),
                filter: Filter::new().with("ID", "2"),
            }
        );
        assert_eq!(
            parse("delete from users").unwrap_err(),
            ParseError::Usage(DELETE_USAGE)
        );
        assert!(matches!(
            parse("delete from users where =2").unwrap_err(),
            ParseError::MalformedClause(_)
        ));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("drop users").unwrap_err(),
            ParseError::UnknownCommand("drop".into())
        );
    }
}
