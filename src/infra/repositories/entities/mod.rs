//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! The counters table has no entity; the sequence repository reaches it
//! through a single raw upsert statement.

pub mod user;
