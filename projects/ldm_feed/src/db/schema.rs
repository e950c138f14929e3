// Mirrors CREATE_MEETINGS_TABLE in meeting/queries.rs.

diesel::table! {
    meetings (partition_key, row_key) {
        partition_key -> Text,
        row_key -> Uuid,
        file_name -> Text,
        timestamp -> Timestamptz,
    }
}
