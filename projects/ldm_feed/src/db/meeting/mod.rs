pub mod models;
pub mod queries;

/// Partition every LDM record is written to.
pub const MEETING_PARTITION: &str = "meeting";
