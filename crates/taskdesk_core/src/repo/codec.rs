//! Row/value translation shared by the entity repositories.
//!
//! # Invariants
//! - Timestamps are written as ISO-8601 text (`YYYY-MM-DDTHH:MM:SS[.fff]`).
//! - Partial updates only name columns supplied by repository code.

use crate::model::ValidationError;
use crate::repo::{RepoError, RepoResult};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Params, Row};
use std::str::FromStr;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const TIMESTAMP_SPACE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn timestamp_to_db(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses ISO-8601 text. A bare date means midnight.
pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, TIMESTAMP_SPACE_FORMAT))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub(crate) fn timestamp_column(row: &Row<'_>, column: &str) -> RepoResult<NaiveDateTime> {
    let text: String = row.get(column)?;
    parse_timestamp(&text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid timestamp `{text}` in {column}"))
    })
}

pub(crate) fn enum_column<T>(row: &Row<'_>, column: &str) -> RepoResult<T>
where
    T: FromStr<Err = ValidationError>,
{
    let text: String = row.get(column)?;
    text.parse::<T>()
        .map_err(|err| RepoError::InvalidData(format!("{err} in {column}")))
}

pub(crate) fn optional_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |text| Value::Text(text.to_string()))
}

/// Wraps `needle` as a literal-substring `LIKE` pattern escaped with `\`.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn query_optional<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Option<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse(row)?));
    }
    Ok(None)
}

pub(crate) fn query_all<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse(row)?);
    }
    Ok(items)
}

/// Column assignments for one `UPDATE ... WHERE id = ?` statement.
#[derive(Debug, Default)]
pub(crate) struct Assignments {
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl Assignments {
    pub(crate) fn set(&mut self, column: &'static str, value: Value) {
        self.columns.push(column);
        self.values.push(value);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Applies the assignments to row `id` of `table`; returns changed rows.
    pub(crate) fn execute(self, conn: &Connection, table: &'static str, id: i64) -> RepoResult<usize> {
        let set_clause = self
            .columns
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut values = self.values;
        values.push(Value::Integer(id));

        let changed = conn.execute(
            &format!("UPDATE {table} SET {set_clause} WHERE id = ?;"),
            params_from_iter(values),
        )?;
        Ok(changed)
    }
}
