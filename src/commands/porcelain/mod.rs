//! Porcelain commands (user-facing output)
//!
//! - `log`: Show commit history, or the history of one path

pub mod log;
