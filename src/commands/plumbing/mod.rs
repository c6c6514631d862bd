//! Plumbing commands (script-friendly output)
//!
//! - `rev-list`: One commit id per line, newest first

pub mod rev_list;
