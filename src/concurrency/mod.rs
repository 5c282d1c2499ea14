//! Concurrency primitives shared by every task of a search run.
//!
//! Everything here is lock-free and safe to hand out by shared reference to an
//! unbounded number of rayon workers.

pub mod atomic;

pub use atomic::{AtomicBitset, TerminationFlag};
