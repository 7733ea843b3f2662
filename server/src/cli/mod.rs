pub mod database_migration;
pub mod file_io;
pub mod manage_events;
