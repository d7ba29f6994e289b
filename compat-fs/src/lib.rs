//! # Node-Style Filesystem Compat Layer
//!
//! Exposes a POSIX/Node-style filesystem surface (`rename`, `exists`,
//! `access`, `unlink`, `stat`, `read_file`, `write_file`, `mkdir`,
//! `append_file`, plus synchronous counterparts) on top of a
//! capability-limited [`NativeStore`](store_traits::NativeStore): whole-file
//! text read/write, existence checks, rename, deletion — no descriptors, no
//! partial I/O, no real metadata, no permission bits.
//!
//! ## What is honest and what is synthesized
//!
//! - Existence, rename, deletion, whole-file text read/write and append are
//!   emulated honestly on the substrate.
//! - `stat` is synthesized: any existing path yields the fixed
//!   [`SYNTHETIC_STAT`] record. Its size and timestamps are placeholders,
//!   never real data.
//! - Access checks test requested bits against the substrate's best-effort
//!   bitmask, not real OS permissions.
//! - `truncate`, `chown` and `chmod` are rejected outright
//!   ([`CompatError::NotImplemented`]); `open_sync`, `close_sync` and
//!   `futimes_sync` are inert logging stubs.
//!
//! ## Call shapes
//!
//! Every operation is one internal synchronous function with two adapters:
//! a `*_sync` form returning a `Result` (or sentinel), and a callback form
//! that invokes its completion callback before the entry point returns.
//! There is no deferred scheduling; callers relying on callbacks firing on
//! a later turn will observe different ordering than a real asynchronous
//! filesystem.

pub mod error;
pub mod fs;
pub mod mode;
pub mod stat;

pub use error::{CompatError, Result};
pub use fs::CompatFs;
pub use mode::AccessMode;
pub use stat::{SyntheticStat, SYNTHETIC_STAT};
