use thiserror::Error;

/// Failures below the IPC boundary. Handlers are the only place these are
/// turned into user-facing error codes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("workspace setup failed: {source}")]
    Workspace {
        #[source]
        source: std::io::Error,
    },

    #[error("database initialization failed: {source}")]
    Init {
        #[source]
        source: rusqlite::Error,
    },

    #[error("{entity}.{op} failed: {source}")]
    Repo {
        entity: &'static str,
        op: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("password hashing failed: {0}")]
    Password(String),
}

impl StoreError {
    pub fn init(source: rusqlite::Error) -> Self {
        StoreError::Init { source }
    }

    pub fn repo(entity: &'static str, op: &'static str) -> impl Fn(rusqlite::Error) -> StoreError {
        move |source| StoreError::Repo { entity, op, source }
    }
}
