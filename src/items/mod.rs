//! Board items and the sources that supply them.
//!
//! The engine only reads: a snapshot of visible descriptors plus, per descriptor, the bytes of
//! the original upload.

/// Item descriptor, the `ItemSource` trait and the in-memory source.
pub mod descriptor;
/// JSON-database-backed source over a data directory.
pub mod store;
