/// Document ids are UUID v7 strings assigned by the store on insert.
pub type DocumentId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
