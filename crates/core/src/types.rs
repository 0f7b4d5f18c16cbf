/// Catalog reference-data primary keys are PostgreSQL BIGSERIAL.
pub type CatalogId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
