use rusqlite::{Connection, Row};

use crate::error::StoreError;
use crate::models::Student;

use super::Record;

const ENTITY: &str = "students";

impl Record for Student {
    const ENTITY: &'static str = ENTITY;
    const LIST_SQL: &'static str =
        "SELECT s.Id, s.StudentNumber, s.FirstName, s.LastName, s.Email, s.Phone,
                s.DateOfBirth, s.CourseId, s.EnrollmentDate, s.IsActive, c.Name AS CourseName
         FROM Students s
         INNER JOIN Courses c ON s.CourseId = c.Id
         WHERE s.IsActive = 1
         ORDER BY s.StudentNumber";
    const GET_SQL: &'static str =
        "SELECT s.Id, s.StudentNumber, s.FirstName, s.LastName, s.Email, s.Phone,
                s.DateOfBirth, s.CourseId, s.EnrollmentDate, s.IsActive, c.Name AS CourseName
         FROM Students s
         INNER JOIN Courses c ON s.CourseId = c.Id
         WHERE s.Id = ? AND s.IsActive = 1";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let first_name: String = row.get(2)?;
        let last_name: String = row.get(3)?;
        let full_name = format!("{first_name} {last_name}");
        Ok(Student {
            id: row.get(0)?,
            student_number: row.get(1)?,
            first_name,
            last_name,
            full_name,
            email: row.get(4)?,
            phone: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            date_of_birth: row.get(6)?,
            course_id: row.get(7)?,
            enrollment_date: row.get(8)?,
            is_active: row.get(9)?,
            course_name: row.get(10)?,
        })
    }
}

pub fn list(conn: &Connection) -> Result<Vec<Student>, StoreError> {
    super::list_all::<Student>(conn)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Student>, StoreError> {
    super::get_by_id::<Student>(conn, id)
}

#[allow(clippy::too_many_arguments)]
pub fn add(
    conn: &Connection,
    student_number: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    date_of_birth: &str,
    course_id: i64,
    enrollment_date: &str,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO Students (StudentNumber, FirstName, LastName, Email, Phone, DateOfBirth,
                               CourseId, EnrollmentDate)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        (
            student_number,
            first_name,
            last_name,
            email,
            phone,
            date_of_birth,
            course_id,
            enrollment_date,
        ),
    )
    .map_err(StoreError::repo(ENTITY, "add"))?;
    Ok(conn.last_insert_rowid())
}

#[allow(clippy::too_many_arguments)]
pub fn update(
    conn: &Connection,
    id: i64,
    student_number: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    date_of_birth: &str,
    course_id: i64,
) -> Result<bool, StoreError> {
    let affected = conn
        .execute(
            "UPDATE Students SET StudentNumber = ?, FirstName = ?, LastName = ?, Email = ?,
                                 Phone = ?, DateOfBirth = ?, CourseId = ?
             WHERE Id = ?",
            (
                student_number,
                first_name,
                last_name,
                email,
                phone,
                date_of_birth,
                course_id,
                id,
            ),
        )
        .map_err(StoreError::repo(ENTITY, "update"))?;
    Ok(affected > 0)
}

pub fn delete(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    super::soft_delete(conn, ENTITY, "Students", id)
}
