use rusqlite::{Connection, Row};

use crate::error::StoreError;
use crate::models::Subject;

use super::Record;

const ENTITY: &str = "subjects";

impl Record for Subject {
    const ENTITY: &'static str = ENTITY;
    const LIST_SQL: &'static str =
        "SELECT s.Id, s.Name, s.Code, s.CourseId, s.Credits, s.Description, s.IsActive,
                s.CreatedDate, c.Name AS CourseName
         FROM Subjects s
         INNER JOIN Courses c ON s.CourseId = c.Id
         WHERE s.IsActive = 1
         ORDER BY c.Name, s.Name";
    const GET_SQL: &'static str =
        "SELECT s.Id, s.Name, s.Code, s.CourseId, s.Credits, s.Description, s.IsActive,
                s.CreatedDate, c.Name AS CourseName
         FROM Subjects s
         INNER JOIN Courses c ON s.CourseId = c.Id
         WHERE s.Id = ? AND s.IsActive = 1";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Subject {
            id: row.get(0)?,
            name: row.get(1)?,
            code: row.get(2)?,
            course_id: row.get(3)?,
            credits: row.get(4)?,
            description: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            is_active: row.get(6)?,
            created_date: row.get(7)?,
            course_name: row.get(8)?,
        })
    }
}

pub fn list(conn: &Connection) -> Result<Vec<Subject>, StoreError> {
    super::list_all::<Subject>(conn)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Subject>, StoreError> {
    super::get_by_id::<Subject>(conn, id)
}

pub fn add(
    conn: &Connection,
    name: &str,
    code: &str,
    course_id: i64,
    credits: i64,
    description: &str,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO Subjects (Name, Code, CourseId, Credits, Description)
         VALUES (?, ?, ?, ?, ?)",
        (name, code, course_id, credits, description),
    )
    .map_err(StoreError::repo(ENTITY, "add"))?;
    Ok(conn.last_insert_rowid())
}

pub fn update(
    conn: &Connection,
    id: i64,
    name: &str,
    code: &str,
    course_id: i64,
    credits: i64,
    description: &str,
) -> Result<bool, StoreError> {
    let affected = conn
        .execute(
            "UPDATE Subjects SET Name = ?, Code = ?, CourseId = ?, Credits = ?, Description = ?
             WHERE Id = ?",
            (name, code, course_id, credits, description, id),
        )
        .map_err(StoreError::repo(ENTITY, "update"))?;
    Ok(affected > 0)
}

pub fn delete(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    super::soft_delete(conn, ENTITY, "Subjects", id)
}
