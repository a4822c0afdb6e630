//! Canonical tree encoding of ordered integer sets (spec §4.C-§4.F).
//!
//! Grounded on `original_source/include/valla/**`: a bitset pool backs
//! ordering bitsets, an indexed hash set gives every distinct bitset and
//! every distinct tree node a stable dense index, and a canonical tree
//! encoder turns a sorted slice of indices into a root slot that two
//! structurally-identical inputs always produce bit-for-bit, regardless of
//! insertion history. `TreeHashIDMap` is the Swiss-table-backed map that
//! both the internal node table and the state repository's root table sit
//! on top of.

pub mod bitset_pool;
pub mod hash_id_map;
pub mod indexed_hash_set;
pub mod tree;

use thiserror::Error;

pub use bitset_pool::{BitsetPool, BitsetView};
pub use hash_id_map::{HashIdMap, TreeHashIdMap};
pub use indexed_hash_set::IndexedHashSet;
pub use tree::{CanonicalTree, RootSlot};

/// Errors local to the canonical-encoding engine (spec §4.F, §9).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VallaError {
    /// A `TreeHashIdMap` rehash could not migrate every stable root into the
    /// enlarged table because structural sharing changed mid-migration, and
    /// escalating the growth factor repeatedly still failed.
    #[error("rehash could not fit migrated roots after {attempts} escalations")]
    CapacityUnderflow { attempts: usize },
}

pub type VallaResult<T> = Result<T, VallaError>;
