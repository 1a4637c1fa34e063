use rusqlite::Connection;
use std::path::Path;

use crate::auth;
use crate::error::StoreError;

/// Opens (creating if needed) the campus database under `workspace` and
/// guarantees schema and seed data exist before the connection is handed out.
pub fn open_db(workspace: &Path) -> Result<Connection, StoreError> {
    std::fs::create_dir_all(workspace).map_err(|source| StoreError::Workspace { source })?;
    let db_path = workspace.join("campus.sqlite3");
    let conn = Connection::open(db_path).map_err(StoreError::init)?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .map_err(StoreError::init)?;

    create_tables(&conn).map_err(StoreError::init)?;
    seed_if_empty(&conn)?;

    Ok(conn)
}

fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS Users(
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            Username TEXT UNIQUE NOT NULL,
            Password TEXT NOT NULL,
            FullName TEXT NOT NULL,
            Email TEXT NOT NULL,
            Role INTEGER NOT NULL,
            CreatedDate TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            IsActive INTEGER NOT NULL DEFAULT 1
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Courses(
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            Name TEXT NOT NULL,
            Code TEXT UNIQUE NOT NULL,
            Description TEXT,
            Duration INTEGER NOT NULL,
            IsActive INTEGER NOT NULL DEFAULT 1,
            CreatedDate TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Subjects(
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            Name TEXT NOT NULL,
            Code TEXT UNIQUE NOT NULL,
            CourseId INTEGER NOT NULL,
            Credits INTEGER NOT NULL,
            Description TEXT,
            IsActive INTEGER NOT NULL DEFAULT 1,
            CreatedDate TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(CourseId) REFERENCES Courses(Id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Students(
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            StudentNumber TEXT UNIQUE NOT NULL,
            FirstName TEXT NOT NULL,
            LastName TEXT NOT NULL,
            Email TEXT NOT NULL,
            Phone TEXT,
            DateOfBirth TEXT NOT NULL,
            CourseId INTEGER NOT NULL,
            EnrollmentDate TEXT NOT NULL DEFAULT CURRENT_DATE,
            IsActive INTEGER NOT NULL DEFAULT 1,
            FOREIGN KEY(CourseId) REFERENCES Courses(Id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Rooms(
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            Name TEXT NOT NULL,
            Code TEXT UNIQUE NOT NULL,
            Type INTEGER NOT NULL,
            Capacity INTEGER NOT NULL,
            Location TEXT,
            Equipment TEXT,
            IsActive INTEGER NOT NULL DEFAULT 1
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Exams(
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            Name TEXT NOT NULL,
            SubjectId INTEGER NOT NULL,
            ExamDate TEXT NOT NULL,
            StartTime TEXT NOT NULL,
            EndTime TEXT NOT NULL,
            RoomId INTEGER NOT NULL,
            MaxMarks INTEGER NOT NULL,
            Description TEXT,
            IsActive INTEGER NOT NULL DEFAULT 1,
            FOREIGN KEY(SubjectId) REFERENCES Subjects(Id),
            FOREIGN KEY(RoomId) REFERENCES Rooms(Id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Marks(
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            StudentId INTEGER NOT NULL,
            ExamId INTEGER NOT NULL,
            MarksObtained REAL NOT NULL,
            Grade TEXT,
            Remarks TEXT,
            RecordedDate TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            RecordedBy INTEGER NOT NULL,
            FOREIGN KEY(StudentId) REFERENCES Students(Id),
            FOREIGN KEY(ExamId) REFERENCES Exams(Id),
            FOREIGN KEY(RecordedBy) REFERENCES Users(Id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS Timetables(
            Id INTEGER PRIMARY KEY AUTOINCREMENT,
            SubjectId INTEGER NOT NULL,
            RoomId INTEGER NOT NULL,
            DayOfWeek INTEGER NOT NULL,
            StartTime TEXT NOT NULL,
            EndTime TEXT NOT NULL,
            LecturerId INTEGER NOT NULL,
            IsActive INTEGER NOT NULL DEFAULT 1,
            FOREIGN KEY(SubjectId) REFERENCES Subjects(Id),
            FOREIGN KEY(RoomId) REFERENCES Rooms(Id),
            FOREIGN KEY(LecturerId) REFERENCES Users(Id)
        )",
        [],
    )?;

    Ok(())
}

/// Demo bring-up data. Inserted only while the Users table is empty, so a
/// second open against the same file is a no-op.
fn seed_if_empty(conn: &Connection) -> Result<(), StoreError> {
    let user_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM Users", [], |row| row.get(0))
        .map_err(StoreError::init)?;
    if user_count > 0 {
        return Ok(());
    }

    let users: [(&str, &str, &str, &str, i64); 4] = [
        ("admin", "admin123", "System Administrator", "admin@campus.edu", 1),
        ("lecturer1", "lect123", "Dr. John Smith", "john.smith@campus.edu", 2),
        ("staff1", "staff123", "Mary Johnson", "mary.johnson@campus.edu", 3),
        ("student1", "stud123", "Alice Brown", "alice.brown@student.campus.edu", 4),
    ];
    for (username, password, full_name, email, role) in users {
        let hash = auth::hash_password(password)?;
        conn.execute(
            "INSERT INTO Users (Username, Password, FullName, Email, Role)
             VALUES (?, ?, ?, ?, ?)",
            (username, hash, full_name, email, role),
        )
        .map_err(StoreError::init)?;
    }

    let courses: [(&str, &str, &str, i64); 3] = [
        ("Computer Science", "CS", "Bachelor of Computer Science", 36),
        ("Information Technology", "IT", "Bachelor of Information Technology", 36),
        ("Software Engineering", "SE", "Bachelor of Software Engineering", 48),
    ];
    for (name, code, description, duration) in courses {
        conn.execute(
            "INSERT INTO Courses (Name, Code, Description, Duration) VALUES (?, ?, ?, ?)",
            (name, code, description, duration),
        )
        .map_err(StoreError::init)?;
    }

    let rooms: [(&str, &str, i64, i64, &str, &str); 3] = [
        ("Main Lecture Hall", "LH001", 1, 100, "Ground Floor", "Projector, Sound System"),
        ("Computer Lab 1", "CL001", 3, 30, "First Floor", "30 Computers, Projector"),
        ("Physics Lab", "PL001", 2, 25, "Second Floor", "Lab Equipment, Safety Gear"),
    ];
    for (name, code, room_type, capacity, location, equipment) in rooms {
        conn.execute(
            "INSERT INTO Rooms (Name, Code, Type, Capacity, Location, Equipment)
             VALUES (?, ?, ?, ?, ?, ?)",
            (name, code, room_type, capacity, location, equipment),
        )
        .map_err(StoreError::init)?;
    }

    let subjects: [(&str, &str, i64, i64, &str); 3] = [
        ("Programming Fundamentals", "CS101", 1, 3, "Introduction to Programming"),
        ("Database Systems", "CS201", 1, 4, "Database Design and Management"),
        ("Web Development", "IT101", 2, 3, "HTML, CSS, JavaScript"),
    ];
    for (name, code, course_id, credits, description) in subjects {
        conn.execute(
            "INSERT INTO Subjects (Name, Code, CourseId, Credits, Description)
             VALUES (?, ?, ?, ?, ?)",
            (name, code, course_id, credits, description),
        )
        .map_err(StoreError::init)?;
    }

    let students: [(&str, &str, &str, &str, &str, &str, i64); 3] = [
        (
            "2024001",
            "Alice",
            "Brown",
            "alice.brown@student.campus.edu",
            "123-456-7890",
            "2000-05-15",
            1,
        ),
        (
            "2024002",
            "Bob",
            "Wilson",
            "bob.wilson@student.campus.edu",
            "123-456-7891",
            "1999-08-22",
            2,
        ),
        (
            "2024003",
            "Carol",
            "Davis",
            "carol.davis@student.campus.edu",
            "123-456-7892",
            "2001-03-10",
            1,
        ),
    ];
    for (number, first, last, email, phone, dob, course_id) in students {
        conn.execute(
            "INSERT INTO Students (StudentNumber, FirstName, LastName, Email, Phone, DateOfBirth, CourseId)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (number, first, last, email, phone, dob, course_id),
        )
        .map_err(StoreError::init)?;
    }

    Ok(())
}
