use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::schema::meetings;

#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = meetings)]
pub struct MeetingRecord {
    pub partition_key: String,
    pub row_key: Uuid,
    pub file_name: String,
    /// Assigned by the store on insert.
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = meetings)]
pub struct NewMeeting<'a> {
    pub partition_key: &'a str,
    pub row_key: Uuid,
    pub file_name: &'a str,
}

impl<'a> NewMeeting<'a> {
    /// Row keys are UUIDv7, so they sort in creation order.
    pub fn new(partition_key: &'a str, file_name: &'a str) -> Self {
        Self {
            partition_key,
            row_key: Uuid::now_v7(),
            file_name,
        }
    }
}
