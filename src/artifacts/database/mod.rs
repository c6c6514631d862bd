//! Database entry types
//!
//! Types used when reading tree objects from the database: an entry pairs the id
//! of the object it points to with the mode recorded for it.

pub mod database_entry;
pub mod entry_mode;
