/// Tokens identifying asynchronous jobs are time-ordered UUIDs (v7).
pub type Token = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
