use rusqlite::types::Type;
use rusqlite::{Connection, Row};

use crate::error::StoreError;
use crate::models::{Room, RoomType};

use super::Record;

const ENTITY: &str = "rooms";

impl Record for Room {
    const ENTITY: &'static str = ENTITY;
    const LIST_SQL: &'static str =
        "SELECT Id, Name, Code, Type, Capacity, Location, Equipment, IsActive
         FROM Rooms WHERE IsActive = 1 ORDER BY Name";
    const GET_SQL: &'static str =
        "SELECT Id, Name, Code, Type, Capacity, Location, Equipment, IsActive
         FROM Rooms WHERE Id = ? AND IsActive = 1";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let type_code: i64 = row.get(3)?;
        let room_type = RoomType::from_i64(type_code).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Integer,
                format!("unknown room type {type_code}").into(),
            )
        })?;
        Ok(Room {
            id: row.get(0)?,
            name: row.get(1)?,
            code: row.get(2)?,
            room_type,
            capacity: row.get(4)?,
            location: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            equipment: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
            is_active: row.get(7)?,
        })
    }
}

pub fn list(conn: &Connection) -> Result<Vec<Room>, StoreError> {
    super::list_all::<Room>(conn)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Room>, StoreError> {
    super::get_by_id::<Room>(conn, id)
}

pub fn add(
    conn: &Connection,
    name: &str,
    code: &str,
    room_type: RoomType,
    capacity: i64,
    location: &str,
    equipment: &str,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO Rooms (Name, Code, Type, Capacity, Location, Equipment)
         VALUES (?, ?, ?, ?, ?, ?)",
        (name, code, room_type.as_i64(), capacity, location, equipment),
    )
    .map_err(StoreError::repo(ENTITY, "add"))?;
    Ok(conn.last_insert_rowid())
}

#[allow(clippy::too_many_arguments)]
pub fn update(
    conn: &Connection,
    id: i64,
    name: &str,
    code: &str,
    room_type: RoomType,
    capacity: i64,
    location: &str,
    equipment: &str,
) -> Result<bool, StoreError> {
    let affected = conn
        .execute(
            "UPDATE Rooms SET Name = ?, Code = ?, Type = ?, Capacity = ?, Location = ?, Equipment = ?
             WHERE Id = ?",
            (name, code, room_type.as_i64(), capacity, location, equipment, id),
        )
        .map_err(StoreError::repo(ENTITY, "update"))?;
    Ok(affected > 0)
}

pub fn delete(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    super::soft_delete(conn, ENTITY, "Rooms", id)
}
