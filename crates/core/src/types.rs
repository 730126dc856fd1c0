/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Rooms are implicit integer ids owned by the external room service; the
/// sync core never stores them as entities.
pub type RoomId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
