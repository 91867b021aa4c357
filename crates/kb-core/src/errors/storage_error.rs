/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("lexical index unavailable: {reason}")]
    IndexUnavailable { reason: String },

    #[error("corrupt embedding for entry {entry_id}: {reason}")]
    CorruptEmbedding { entry_id: i64, reason: String },

    #[error("connection lock poisoned: {details}")]
    LockPoisoned { details: String },
}
