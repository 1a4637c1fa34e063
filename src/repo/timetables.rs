use rusqlite::{Connection, Row};

use crate::error::StoreError;
use crate::models::TimetableEntry;

use super::Record;

const ENTITY: &str = "timetables";

impl Record for TimetableEntry {
    const ENTITY: &'static str = ENTITY;
    const LIST_SQL: &'static str =
        "SELECT t.Id, t.SubjectId, t.RoomId, t.DayOfWeek, t.StartTime, t.EndTime, t.LecturerId,
                t.IsActive, s.Name AS SubjectName, r.Name AS RoomName,
                u.FullName AS LecturerName, c.Name AS CourseName
         FROM Timetables t
         INNER JOIN Subjects s ON t.SubjectId = s.Id
         INNER JOIN Rooms r ON t.RoomId = r.Id
         INNER JOIN Users u ON t.LecturerId = u.Id
         INNER JOIN Courses c ON s.CourseId = c.Id
         WHERE t.IsActive = 1
         ORDER BY t.DayOfWeek, t.StartTime";
    const GET_SQL: &'static str =
        "SELECT t.Id, t.SubjectId, t.RoomId, t.DayOfWeek, t.StartTime, t.EndTime, t.LecturerId,
                t.IsActive, s.Name AS SubjectName, r.Name AS RoomName,
                u.FullName AS LecturerName, c.Name AS CourseName
         FROM Timetables t
         INNER JOIN Subjects s ON t.SubjectId = s.Id
         INNER JOIN Rooms r ON t.RoomId = r.Id
         INNER JOIN Users u ON t.LecturerId = u.Id
         INNER JOIN Courses c ON s.CourseId = c.Id
         WHERE t.Id = ? AND t.IsActive = 1";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(TimetableEntry {
            id: row.get(0)?,
            subject_id: row.get(1)?,
            room_id: row.get(2)?,
            day_of_week: row.get(3)?,
            start_time: row.get(4)?,
            end_time: row.get(5)?,
            lecturer_id: row.get(6)?,
            is_active: row.get(7)?,
            subject_name: row.get(8)?,
            room_name: row.get(9)?,
            lecturer_name: row.get(10)?,
            course_name: row.get(11)?,
        })
    }
}

pub fn list(conn: &Connection) -> Result<Vec<TimetableEntry>, StoreError> {
    super::list_all::<TimetableEntry>(conn)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<TimetableEntry>, StoreError> {
    super::get_by_id::<TimetableEntry>(conn, id)
}

pub fn add(
    conn: &Connection,
    subject_id: i64,
    room_id: i64,
    day_of_week: i64,
    start_time: &str,
    end_time: &str,
    lecturer_id: i64,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO Timetables (SubjectId, RoomId, DayOfWeek, StartTime, EndTime, LecturerId)
         VALUES (?, ?, ?, ?, ?, ?)",
        (subject_id, room_id, day_of_week, start_time, end_time, lecturer_id),
    )
    .map_err(StoreError::repo(ENTITY, "add"))?;
    Ok(conn.last_insert_rowid())
}

#[allow(clippy::too_many_arguments)]
pub fn update(
    conn: &Connection,
    id: i64,
    subject_id: i64,
    room_id: i64,
    day_of_week: i64,
    start_time: &str,
    end_time: &str,
    lecturer_id: i64,
) -> Result<bool, StoreError> {
    let affected = conn
        .execute(
            "UPDATE Timetables SET SubjectId = ?, RoomId = ?, DayOfWeek = ?, StartTime = ?,
                                   EndTime = ?, LecturerId = ?
             WHERE Id = ?",
            (subject_id, room_id, day_of_week, start_time, end_time, lecturer_id, id),
        )
        .map_err(StoreError::repo(ENTITY, "update"))?;
    Ok(affected > 0)
}

pub fn delete(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    super::soft_delete(conn, ENTITY, "Timetables", id)
}
