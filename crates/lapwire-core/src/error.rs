use std::path::PathBuf;

/// Errors that can occur at the timing core's filesystem touchpoints.
///
/// None of these are fatal to the pipeline: the [`EventPipeline`] boundary
/// converts every one of them into a diagnostic record and keeps going.
///
/// [`EventPipeline`]: crate::pipeline::EventPipeline
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Writing or atomically replacing the summary file failed. The
    /// in-memory registry remains authoritative; the next counted lap
    /// retries the full rewrite.
    #[error("summary publish failed for {path}: {source}")]
    Publish {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Appending to the event log failed.
    #[error("event log append failed for {path}: {source}")]
    EventLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rider name table file could not be read.
    #[error("rider table unreadable at {path}: {source}")]
    RiderTableIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rider name table file is not a JSON object of id -> name.
    #[error("rider table malformed at {path}: {source}")]
    RiderTableParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
