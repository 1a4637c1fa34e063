use rusqlite::{Connection, Row};

use crate::error::StoreError;
use crate::models::Exam;

use super::Record;

const ENTITY: &str = "exams";

impl Record for Exam {
    const ENTITY: &'static str = ENTITY;
    const LIST_SQL: &'static str =
        "SELECT e.Id, e.Name, e.SubjectId, e.ExamDate, e.StartTime, e.EndTime, e.RoomId,
                e.MaxMarks, e.Description, e.IsActive, s.Name AS SubjectName, r.Name AS RoomName
         FROM Exams e
         INNER JOIN Subjects s ON e.SubjectId = s.Id
         INNER JOIN Rooms r ON e.RoomId = r.Id
         WHERE e.IsActive = 1
         ORDER BY e.ExamDate, e.StartTime";
    const GET_SQL: &'static str =
        "SELECT e.Id, e.Name, e.SubjectId, e.ExamDate, e.StartTime, e.EndTime, e.RoomId,
                e.MaxMarks, e.Description, e.IsActive, s.Name AS SubjectName, r.Name AS RoomName
         FROM Exams e
         INNER JOIN Subjects s ON e.SubjectId = s.Id
         INNER JOIN Rooms r ON e.RoomId = r.Id
         WHERE e.Id = ? AND e.IsActive = 1";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Exam {
            id: row.get(0)?,
            name: row.get(1)?,
            subject_id: row.get(2)?,
            exam_date: row.get(3)?,
            start_time: row.get(4)?,
            end_time: row.get(5)?,
            room_id: row.get(6)?,
            max_marks: row.get(7)?,
            description: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
            is_active: row.get(9)?,
            subject_name: row.get(10)?,
            room_name: row.get(11)?,
        })
    }
}

pub fn list(conn: &Connection) -> Result<Vec<Exam>, StoreError> {
    super::list_all::<Exam>(conn)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Exam>, StoreError> {
    super::get_by_id::<Exam>(conn, id)
}

#[allow(clippy::too_many_arguments)]
pub fn add(
    conn: &Connection,
    name: &str,
    subject_id: i64,
    exam_date: &str,
    start_time: &str,
    end_time: &str,
    room_id: i64,
    max_marks: i64,
    description: &str,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO Exams (Name, SubjectId, ExamDate, StartTime, EndTime, RoomId, MaxMarks, Description)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        (
            name,
            subject_id,
            exam_date,
            start_time,
            end_time,
            room_id,
            max_marks,
            description,
        ),
    )
    .map_err(StoreError::repo(ENTITY, "add"))?;
    Ok(conn.last_insert_rowid())
}

#[allow(clippy::too_many_arguments)]
pub fn update(
    conn: &Connection,
    id: i64,
    name: &str,
    subject_id: i64,
    exam_date: &str,
    start_time: &str,
    end_time: &str,
    room_id: i64,
    max_marks: i64,
    description: &str,
) -> Result<bool, StoreError> {
    let affected = conn
        .execute(
            "UPDATE Exams SET Name = ?, SubjectId = ?, ExamDate = ?, StartTime = ?, EndTime = ?,
                              RoomId = ?, MaxMarks = ?, Description = ?
             WHERE Id = ?",
            (
                name,
                subject_id,
                exam_date,
                start_time,
                end_time,
                room_id,
                max_marks,
                description,
                id,
            ),
        )
        .map_err(StoreError::repo(ENTITY, "update"))?;
    Ok(affected > 0)
}

pub fn delete(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    super::soft_delete(conn, ENTITY, "Exams", id)
}
