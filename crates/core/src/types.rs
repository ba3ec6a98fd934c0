/// Product identifiers are store-generated UUIDs.
pub type ProductId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
