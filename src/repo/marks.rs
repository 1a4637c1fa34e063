//! Marks have no active flag: delete is a hard row removal, and reads carry
//! no activity filter. The stored grade is derived by the caller from the
//! owning exam's maximum at record time.

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

use crate::calc;
use crate::error::StoreError;
use crate::models::Mark;

use super::Record;

const ENTITY: &str = "marks";

const BASE_SQL: &str =
    "SELECT m.Id, m.StudentId, m.ExamId, m.MarksObtained, m.Grade, m.Remarks, m.RecordedDate,
            m.RecordedBy, st.FirstName || ' ' || st.LastName AS StudentName,
            e.Name AS ExamName, sub.Name AS SubjectName, e.MaxMarks
     FROM Marks m
     INNER JOIN Students st ON m.StudentId = st.Id
     INNER JOIN Exams e ON m.ExamId = e.Id
     INNER JOIN Subjects sub ON e.SubjectId = sub.Id
     WHERE 1 = 1";

impl Record for Mark {
    const ENTITY: &'static str = ENTITY;
    const LIST_SQL: &'static str =
        "SELECT m.Id, m.StudentId, m.ExamId, m.MarksObtained, m.Grade, m.Remarks, m.RecordedDate,
                m.RecordedBy, st.FirstName || ' ' || st.LastName AS StudentName,
                e.Name AS ExamName, sub.Name AS SubjectName, e.MaxMarks
         FROM Marks m
         INNER JOIN Students st ON m.StudentId = st.Id
         INNER JOIN Exams e ON m.ExamId = e.Id
         INNER JOIN Subjects sub ON e.SubjectId = sub.Id
         ORDER BY m.Id";
    const GET_SQL: &'static str =
        "SELECT m.Id, m.StudentId, m.ExamId, m.MarksObtained, m.Grade, m.Remarks, m.RecordedDate,
                m.RecordedBy, st.FirstName || ' ' || st.LastName AS StudentName,
                e.Name AS ExamName, sub.Name AS SubjectName, e.MaxMarks
         FROM Marks m
         INNER JOIN Students st ON m.StudentId = st.Id
         INNER JOIN Exams e ON m.ExamId = e.Id
         INNER JOIN Subjects sub ON e.SubjectId = sub.Id
         WHERE m.Id = ?";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let marks_obtained: f64 = row.get(3)?;
        let max_marks: i64 = row.get(11)?;
        Ok(Mark {
            id: row.get(0)?,
            student_id: row.get(1)?,
            exam_id: row.get(2)?,
            marks_obtained,
            grade: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            remarks: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            recorded_date: row.get(6)?,
            recorded_by: row.get(7)?,
            student_name: row.get(8)?,
            exam_name: row.get(9)?,
            subject_name: row.get(10)?,
            max_marks,
            percentage: calc::percentage(marks_obtained, max_marks as f64),
        })
    }
}

/// List with optional student/exam narrowing, for the per-student and
/// per-exam views.
pub fn list(
    conn: &Connection,
    student_id: Option<i64>,
    exam_id: Option<i64>,
) -> Result<Vec<Mark>, StoreError> {
    let mut sql = String::from(BASE_SQL);
    let mut params: Vec<Value> = Vec::new();
    if let Some(id) = student_id {
        sql.push_str(" AND m.StudentId = ?");
        params.push(Value::Integer(id));
    }
    if let Some(id) = exam_id {
        sql.push_str(" AND m.ExamId = ?");
        params.push(Value::Integer(id));
    }
    sql.push_str(" ORDER BY m.Id");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(StoreError::repo(ENTITY, "getAll"))?;
    let rows = stmt
        .query_map(params_from_iter(params), |row| Mark::from_row(row))
        .and_then(|it| it.collect::<Result<Vec<_>, _>>())
        .map_err(StoreError::repo(ENTITY, "getAll"))?;
    Ok(rows)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Mark>, StoreError> {
    super::get_by_id::<Mark>(conn, id)
}

pub fn add(
    conn: &Connection,
    student_id: i64,
    exam_id: i64,
    marks_obtained: f64,
    grade: &str,
    remarks: &str,
    recorded_by: i64,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO Marks (StudentId, ExamId, MarksObtained, Grade, Remarks, RecordedBy)
         VALUES (?, ?, ?, ?, ?, ?)",
        (student_id, exam_id, marks_obtained, grade, remarks, recorded_by),
    )
    .map_err(StoreError::repo(ENTITY, "add"))?;
    Ok(conn.last_insert_rowid())
}

pub fn update(
    conn: &Connection,
    id: i64,
    student_id: i64,
    exam_id: i64,
    marks_obtained: f64,
    grade: &str,
    remarks: &str,
) -> Result<bool, StoreError> {
    let affected = conn
        .execute(
            "UPDATE Marks SET StudentId = ?, ExamId = ?, MarksObtained = ?, Grade = ?, Remarks = ?
             WHERE Id = ?",
            (student_id, exam_id, marks_obtained, grade, remarks, id),
        )
        .map_err(StoreError::repo(ENTITY, "update"))?;
    Ok(affected > 0)
}

/// The one hard delete in the system.
pub fn delete(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    let affected = conn
        .execute("DELETE FROM Marks WHERE Id = ?", [id])
        .map_err(StoreError::repo(ENTITY, "delete"))?;
    Ok(affected > 0)
}
