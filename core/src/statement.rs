//! SQL text for the statements `#[derive(Model)]` runs. Identifiers are quoted, values are
//! always `?` placeholders.
use crate::schema::quote_ident;
use itertools::Itertools;

fn column_list(columns: &[&str]) -> String {
    columns.iter().map(|c| quote_ident(c)).join(", ")
}

pub fn select(table: &str, columns: &[&str]) -> String {
    format!("SELECT {} FROM {}", column_list(columns), quote_ident(table))
}

pub fn select_where(table: &str, columns: &[&str], key: &str) -> String {
    format!("{} WHERE {} = ?", select(table, columns), quote_ident(key))
}

/// With no columns the row is built entirely from database defaults.
pub fn insert(table: &str, columns: &[&str], returning: &[&str]) -> String {
    let table = quote_ident(table);
    let returning = column_list(returning);
    if columns.is_empty() {
        return format!("INSERT INTO {table} DEFAULT VALUES RETURNING {returning}");
    }
    let placeholders = columns.iter().map(|_| "?").join(", ");
    format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders}) RETURNING {returning}",
        column_list(columns)
    )
}

/// Binds every column in order, then the key.
pub fn update(table: &str, columns: &[&str], key: &str) -> String {
    let assignments = columns.iter().map(|c| format!("{} = ?", quote_ident(c))).join(", ");
    format!(
        "UPDATE {} SET {assignments} WHERE {} = ? RETURNING {}",
        quote_ident(table),
        quote_ident(key),
        column_list(columns)
    )
}

pub fn delete(table: &str, key: &str) -> String {
    format!("DELETE FROM {} WHERE {} = ?", quote_ident(table), quote_ident(key))
}
