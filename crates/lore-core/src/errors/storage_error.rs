/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("stored row for {id} is unreadable: {details}")]
    CorruptRow { id: String, details: String },

    #[error("lock poisoned: {resource}")]
    LockPoisoned { resource: String },
}
