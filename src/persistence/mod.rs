pub mod preferences;
pub mod redb_store;
