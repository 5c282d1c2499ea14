//! Lock-free atomic primitives.
//!
//! Important:
//! - Atomic RMW operations have inherent hardware cost. The shared search state
//!   keeps them to one RMW per claimed cell.
//! - Flags that every worker polls on each loop iteration are cache padded.

/// Word-packed atomic bitsets.
pub mod bitset;
/// Set-once, read-many termination flag.
pub mod flag;

pub use bitset::AtomicBitset;
pub use flag::TerminationFlag;
