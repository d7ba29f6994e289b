//! # Native Store Contract
//!
//! Defines the contract between the compat layer and the storage substrate
//! it adapts. The substrate is capability-limited by design: whole-file
//! text read/write, existence checks, rename, deletion, entry creation,
//! and a best-effort access bitmask — nothing more.
//!
//! Each supported substrate ships a concrete [`NativeStore`] implementation
//! (see the `store-memory` crate for the in-memory reference substrate).
//! Implementations convert their internal failures into [`StoreError`] and
//! must be `Send + Sync`.

pub mod error;
pub mod store;

pub use error::{Result, StoreError};
pub use store::{NativeStore, ACCESS_ABSENT};
