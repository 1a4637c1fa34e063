use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::error::StoreError;
use crate::models::{Role, User};

use super::Record;

const ENTITY: &str = "users";

const COLUMNS: &str = "Id, Username, Password, FullName, Email, Role, CreatedDate, IsActive";

impl Record for User {
    const ENTITY: &'static str = ENTITY;
    const LIST_SQL: &'static str =
        "SELECT Id, Username, Password, FullName, Email, Role, CreatedDate, IsActive
         FROM Users WHERE IsActive = 1 ORDER BY Username";
    const GET_SQL: &'static str =
        "SELECT Id, Username, Password, FullName, Email, Role, CreatedDate, IsActive
         FROM Users WHERE Id = ? AND IsActive = 1";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let role_code: i64 = row.get(5)?;
        let role = Role::from_i64(role_code).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                Type::Integer,
                format!("unknown role {role_code}").into(),
            )
        })?;
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            password_hash: row.get(2)?,
            full_name: row.get(3)?,
            email: row.get(4)?,
            role,
            created_date: row.get(6)?,
            is_active: row.get(7)?,
        })
    }
}

pub fn list(conn: &Connection) -> Result<Vec<User>, StoreError> {
    super::list_all::<User>(conn)
}

pub fn list_by_role(conn: &Connection, role: Role) -> Result<Vec<User>, StoreError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM Users WHERE Role = ? AND IsActive = 1 ORDER BY Username"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(StoreError::repo(ENTITY, "getAll"))?;
    let rows = stmt
        .query_map([role.as_i64()], |row| User::from_row(row))
        .and_then(|it| it.collect::<Result<Vec<_>, _>>())
        .map_err(StoreError::repo(ENTITY, "getAll"))?;
    Ok(rows)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<User>, StoreError> {
    super::get_by_id::<User>(conn, id)
}

pub fn find_by_username(conn: &Connection, username: &str) -> Result<Option<User>, StoreError> {
    let sql = format!("SELECT {COLUMNS} FROM Users WHERE Username = ? AND IsActive = 1");
    conn.query_row(&sql, [username], |row| User::from_row(row))
        .optional()
        .map_err(StoreError::repo(ENTITY, "findByUsername"))
}

pub fn add(
    conn: &Connection,
    username: &str,
    password_hash: &str,
    full_name: &str,
    email: &str,
    role: Role,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO Users (Username, Password, FullName, Email, Role)
         VALUES (?, ?, ?, ?, ?)",
        (username, password_hash, full_name, email, role.as_i64()),
    )
    .map_err(StoreError::repo(ENTITY, "add"))?;
    Ok(conn.last_insert_rowid())
}

/// Full-row update except the credential, which only moves through
/// [`set_password`].
pub fn update(
    conn: &Connection,
    id: i64,
    username: &str,
    full_name: &str,
    email: &str,
    role: Role,
) -> Result<bool, StoreError> {
    let affected = conn
        .execute(
            "UPDATE Users SET Username = ?, FullName = ?, Email = ?, Role = ? WHERE Id = ?",
            (username, full_name, email, role.as_i64(), id),
        )
        .map_err(StoreError::repo(ENTITY, "update"))?;
    Ok(affected > 0)
}

pub fn set_password(conn: &Connection, id: i64, password_hash: &str) -> Result<bool, StoreError> {
    let affected = conn
        .execute(
            "UPDATE Users SET Password = ? WHERE Id = ?",
            (password_hash, id),
        )
        .map_err(StoreError::repo(ENTITY, "changePassword"))?;
    Ok(affected > 0)
}

pub fn delete(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    super::soft_delete(conn, ENTITY, "Users", id)
}
