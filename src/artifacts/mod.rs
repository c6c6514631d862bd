//! Git data structures and algorithms
//!
//! - `branch`: Ref names and revision parsing
//! - `core`: Shared utilities (pager wrapper, date parsing)
//! - `database`: Tree entry types
//! - `log`: Commit history traversal and file history
//! - `objects`: Git object types (blob, tree, commit)

pub mod branch;
pub mod core;
pub mod database;
pub mod log;
pub mod objects;
