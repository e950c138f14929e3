use diesel::prelude::*;
use thiserror::Error;

use crate::db::{meeting::models::*, schema::meetings::dsl::*};

pub const CREATE_MEETINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS meetings (
    partition_key TEXT NOT NULL,
    row_key UUID NOT NULL,
    file_name TEXT NOT NULL,
    "timestamp" TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (partition_key, row_key)
)"#;

#[derive(Debug, Error)]
pub enum CreateMeetingsTableError {
    #[error("CreateMeetingsTable: {source}")]
    CreateMeetingsTable {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn create_meetings_table(conn: &mut PgConnection) -> Result<(), CreateMeetingsTableError> {
    diesel::sql_query(CREATE_MEETINGS_TABLE)
        .execute(conn)
        .map(|_| ())
        .map_err(|source| CreateMeetingsTableError::CreateMeetingsTable { source })
}

#[derive(Debug, Error)]
pub enum InsertMeetingError {
    #[error("InsertMeeting: {source}")]
    InsertMeeting {
        #[from]
        source: diesel::result::Error,
    },
}

pub fn insert_meeting(
    conn: &mut PgConnection,
    new: &NewMeeting,
) -> Result<MeetingRecord, InsertMeetingError> {
    diesel::insert_into(meetings)
        .values(new)
        .returning(MeetingRecord::as_returning())
        .get_result(conn)
        .map_err(|source| InsertMeetingError::InsertMeeting { source })
}

#[derive(Debug, Error)]
pub enum ListMeetingsInPartitionError {
    #[error("ListMeetingsInPartition: {source}")]
    ListMeetingsInPartition {
        #[from]
        source: diesel::result::Error,
    },
}

/// Newest first. Row keys break timestamp ties.
pub fn list_meetings_in_partition(
    conn: &mut PgConnection,
    partition: &str,
) -> Result<Vec<MeetingRecord>, ListMeetingsInPartitionError> {
    meetings
        .filter(partition_key.eq(partition))
        .order_by((timestamp.desc(), row_key.desc()))
        .select(MeetingRecord::as_select())
        .load(conn)
        .map_err(|source| ListMeetingsInPartitionError::ListMeetingsInPartition { source })
}
