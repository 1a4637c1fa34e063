//! Data access. One module per entity family, sharing the generic list/get/
//! soft-delete routines below. Every statement is parameterized; reads are
//! always scoped to active rows (Marks carry no active flag and are the one
//! hard-delete exception).

use rusqlite::{Connection, OptionalExtension, Row};

use crate::error::StoreError;

pub mod courses;
pub mod exams;
pub mod marks;
pub mod rooms;
pub mod students;
pub mod subjects;
pub mod timetables;
pub mod users;

/// A row-mapped entity with uniform list/get statements. The SQL is full
/// statement text so joined display columns live with the entity that needs
/// them.
pub(crate) trait Record: Sized {
    const ENTITY: &'static str;
    const LIST_SQL: &'static str;
    const GET_SQL: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

pub(crate) fn list_all<T: Record>(conn: &Connection) -> Result<Vec<T>, StoreError> {
    let mut stmt = conn
        .prepare(T::LIST_SQL)
        .map_err(StoreError::repo(T::ENTITY, "getAll"))?;
    let rows = stmt
        .query_map([], |row| T::from_row(row))
        .and_then(|it| it.collect::<Result<Vec<_>, _>>())
        .map_err(StoreError::repo(T::ENTITY, "getAll"))?;
    Ok(rows)
}

/// Empty result means "not found", never an error.
pub(crate) fn get_by_id<T: Record>(conn: &Connection, id: i64) -> Result<Option<T>, StoreError> {
    conn.query_row(T::GET_SQL, [id], |row| T::from_row(row))
        .optional()
        .map_err(StoreError::repo(T::ENTITY, "getById"))
}

/// Flips the active flag on a still-active row. Deleting an already-inactive
/// id reports false, not an error.
pub(crate) fn soft_delete(
    conn: &Connection,
    entity: &'static str,
    table: &str,
    id: i64,
) -> Result<bool, StoreError> {
    let sql = format!("UPDATE {table} SET IsActive = 0 WHERE Id = ? AND IsActive = 1");
    let affected = conn
        .execute(&sql, [id])
        .map_err(StoreError::repo(entity, "delete"))?;
    Ok(affected > 0)
}

/// Probe for an active row, used to validate foreign keys before a write.
pub(crate) fn exists(
    conn: &Connection,
    entity: &'static str,
    table: &str,
    id: i64,
) -> Result<bool, StoreError> {
    let sql = format!("SELECT 1 FROM {table} WHERE Id = ? AND IsActive = 1");
    let found: Option<i64> = conn
        .query_row(&sql, [id], |row| row.get(0))
        .optional()
        .map_err(StoreError::repo(entity, "exists"))?;
    Ok(found.is_some())
}
