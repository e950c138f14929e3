use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::db::{
    meeting::{
        models::{MeetingRecord, NewMeeting},
        queries::{
            create_meetings_table, insert_meeting, list_meetings_in_partition,
            CreateMeetingsTableError, InsertMeetingError, ListMeetingsInPartitionError,
        },
    },
    PgPool,
};

#[derive(Debug, Error)]
pub enum MeetingStoreError {
    #[error("GetConnectionFromPool: {source}")]
    GetConnectionFromPool {
        #[from]
        source: r2d2::Error,
    },

    #[error(transparent)]
    CreateMeetingsTable {
        #[from]
        source: CreateMeetingsTableError,
    },

    #[error(transparent)]
    InsertMeeting {
        #[from]
        source: InsertMeetingError,
    },

    #[error(transparent)]
    ListMeetingsInPartition {
        #[from]
        source: ListMeetingsInPartitionError,
    },

    #[error("TableNotFound: {table}")]
    TableNotFound { table: &'static str },

    #[error("BlockingTask: {source}")]
    BlockingTask {
        #[from]
        source: tokio::task::JoinError,
    },
}

/// Append-only table addressed by partition and row key.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    /// Creates the backing table if needed. Safe to call on every request.
    async fn create_if_not_exists(&self) -> Result<(), MeetingStoreError>;

    /// Writes one record and returns its freshly generated row key.
    async fn append(&self, partition: &str, file_name: &str) -> Result<Uuid, MeetingStoreError>;

    /// All records of `partition`, most recently inserted first.
    async fn list_partition(&self, partition: &str) -> Result<Vec<MeetingRecord>, MeetingStoreError>;
}

/// PostgreSQL-backed store. Diesel is synchronous, so every call runs on
/// the blocking pool.
#[derive(Clone)]
pub struct PgMeetingStore {
    pool: PgPool,
}

impl PgMeetingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MeetingStore for PgMeetingStore {
    async fn create_if_not_exists(&self) -> Result<(), MeetingStoreError> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<(), MeetingStoreError> {
            let mut conn = pool.get()?;
            create_meetings_table(&mut conn)?;
            Ok(())
        })
        .await?
    }

    async fn append(&self, partition: &str, file_name: &str) -> Result<Uuid, MeetingStoreError> {
        let pool = self.pool.clone();
        let partition = partition.to_owned();
        let file_name = file_name.to_owned();
        tokio::task::spawn_blocking(move || -> Result<Uuid, MeetingStoreError> {
            let mut conn = pool.get()?;
            let record = insert_meeting(&mut conn, &NewMeeting::new(&partition, &file_name))?;
            Ok(record.row_key)
        })
        .await?
    }

    async fn list_partition(&self, partition: &str) -> Result<Vec<MeetingRecord>, MeetingStoreError> {
        let pool = self.pool.clone();
        let partition = partition.to_owned();
        tokio::task::spawn_blocking(move || -> Result<Vec<MeetingRecord>, MeetingStoreError> {
            let mut conn = pool.get()?;
            Ok(list_meetings_in_partition(&mut conn, &partition)?)
        })
        .await?
    }
}

/// Process-local store used by the test suites.
///
/// Like the database, it rejects reads and writes until the table has been
/// created.
#[derive(Debug, Default)]
pub struct MemoryMeetingStore {
    created: AtomicBool,
    records: Mutex<Vec<MeetingRecord>>,
}

impl MemoryMeetingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_exists(&self) -> bool {
        self.created.load(Ordering::SeqCst)
    }

    fn ensure_table(&self) -> Result<(), MeetingStoreError> {
        if self.table_exists() {
            Ok(())
        } else {
            Err(MeetingStoreError::TableNotFound { table: "meetings" })
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<MeetingRecord>> {
        // A poisoned lock still holds a consistent Vec; records are only pushed.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MeetingStore for MemoryMeetingStore {
    async fn create_if_not_exists(&self) -> Result<(), MeetingStoreError> {
        self.created.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn append(&self, partition: &str, file_name: &str) -> Result<Uuid, MeetingStoreError> {
        self.ensure_table()?;
        let mut records = self.lock();

        // Keep timestamps strictly increasing even when the wall clock is coarse.
        let now = Utc::now();
        let timestamp = match records.last() {
            Some(last) if last.timestamp >= now => last.timestamp + Duration::microseconds(1),
            _ => now,
        };

        let new = NewMeeting::new(partition, file_name);
        records.push(MeetingRecord {
            partition_key: new.partition_key.to_string(),
            row_key: new.row_key,
            file_name: new.file_name.to_string(),
            timestamp,
        });

        Ok(new.row_key)
    }

    async fn list_partition(&self, partition: &str) -> Result<Vec<MeetingRecord>, MeetingStoreError> {
        self.ensure_table()?;
        let mut listed: Vec<MeetingRecord> = self
            .lock()
            .iter()
            .filter(|record| record.partition_key == partition)
            .cloned()
            .collect();

        listed.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.row_key.cmp(&a.row_key))
        });

        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::meeting::MEETING_PARTITION;

    #[tokio::test]
    async fn test_memory_store_lists_newest_first() {
        let store = MemoryMeetingStore::new();
        store.create_if_not_exists().await.unwrap();

        let first = store.append(MEETING_PARTITION, "meetings/2024/LDM-2024-01-10.md").await.unwrap();
        let second = store.append(MEETING_PARTITION, "meetings/2024/LDM-2024-01-17.md").await.unwrap();
        let third = store.append(MEETING_PARTITION, "meetings/2024/LDM-2024-01-24.md").await.unwrap();

        assert!(first < second && second < third, "row keys follow creation order");

        let listed = store.list_partition(MEETING_PARTITION).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "meetings/2024/LDM-2024-01-24.md",
                "meetings/2024/LDM-2024-01-17.md",
                "meetings/2024/LDM-2024-01-10.md",
            ]
        );
        assert!(listed.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }

    #[tokio::test]
    async fn test_memory_store_partitions_are_separate() {
        let store = MemoryMeetingStore::new();
        store.create_if_not_exists().await.unwrap();
        store.append(MEETING_PARTITION, "a.md").await.unwrap();
        store.append("other", "b.md").await.unwrap();

        let listed = store.list_partition(MEETING_PARTITION).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].file_name, "a.md");
        assert_eq!(listed[0].partition_key, MEETING_PARTITION);

        assert!(store.list_partition("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_requires_table() {
        let store = MemoryMeetingStore::new();
        assert!(!store.table_exists());

        let err = store.append(MEETING_PARTITION, "a.md").await.unwrap_err();
        assert!(matches!(err, MeetingStoreError::TableNotFound { table: "meetings" }));
        assert!(store.list_partition(MEETING_PARTITION).await.is_err());

        store.create_if_not_exists().await.unwrap();
        store.create_if_not_exists().await.unwrap();
        assert!(store.table_exists());
        assert!(store.list_partition(MEETING_PARTITION).await.unwrap().is_empty());
    }
}
