use rusqlite::{Connection, Row};

use crate::error::StoreError;
use crate::models::Course;

use super::Record;

const ENTITY: &str = "courses";

impl Record for Course {
    const ENTITY: &'static str = ENTITY;
    const LIST_SQL: &'static str = "SELECT Id, Name, Code, Description, Duration, IsActive, CreatedDate
         FROM Courses WHERE IsActive = 1 ORDER BY Name";
    const GET_SQL: &'static str = "SELECT Id, Name, Code, Description, Duration, IsActive, CreatedDate
         FROM Courses WHERE Id = ? AND IsActive = 1";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Course {
            id: row.get(0)?,
            name: row.get(1)?,
            code: row.get(2)?,
            description: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            duration: row.get(4)?,
            is_active: row.get(5)?,
            created_date: row.get(6)?,
        })
    }
}

pub fn list(conn: &Connection) -> Result<Vec<Course>, StoreError> {
    super::list_all::<Course>(conn)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Course>, StoreError> {
    super::get_by_id::<Course>(conn, id)
}

pub fn add(
    conn: &Connection,
    name: &str,
    code: &str,
    description: &str,
    duration: i64,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO Courses (Name, Code, Description, Duration) VALUES (?, ?, ?, ?)",
        (name, code, description, duration),
    )
    .map_err(StoreError::repo(ENTITY, "add"))?;
    Ok(conn.last_insert_rowid())
}

pub fn update(
    conn: &Connection,
    id: i64,
    name: &str,
    code: &str,
    description: &str,
    duration: i64,
) -> Result<bool, StoreError> {
    let affected = conn
        .execute(
            "UPDATE Courses SET Name = ?, Code = ?, Description = ?, Duration = ? WHERE Id = ?",
            (name, code, description, duration, id),
        )
        .map_err(StoreError::repo(ENTITY, "update"))?;
    Ok(affected > 0)
}

pub fn delete(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    super::soft_delete(conn, ENTITY, "Courses", id)
}
