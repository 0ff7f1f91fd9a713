//! Persistent link store (SQLite via sqlx).
//!
//! Each shortened value is one row; its row id is what the codec turns into
//! the short code. Rows also count how often the short link was followed.

mod db;
mod links;
mod types;

pub use db::LinkDb;
pub use types::*;

#[cfg(test)]
pub(crate) use db::open_memory;
