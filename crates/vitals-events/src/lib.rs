//! # vitals-events
//!
//! The event store: an append-only ring buffer ordered newest-first,
//! linear-scan windowed queries, durable flushes every N appends, and a
//! retention sweep.

pub mod flush;
pub mod query;
pub mod retention;
pub mod samples;
pub mod store;

pub use query::EventQuery;
pub use store::EventStore;
