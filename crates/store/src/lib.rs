//! Generic key-value store protocol.
//!
//! The graph backend is written against [`Store`], which exposes only
//! primitive set, ordered-set, string, and atomic-counter operations plus
//! batched command submission. Any store offering these primitives — an
//! in-process map, a networked key-value server — can persist graphs.
//!
//! # Visibility contract
//!
//! A batch submitted through [`Store::apply`] becomes visible to other
//! callers atomically: all of its effects or none. Nothing is promised
//! across separate batches; multi-batch operations may be observed
//! half-done by concurrent readers.

pub mod batch;
pub mod memory;

use std::collections::HashSet;

use weft_core::WeftResult;

pub use batch::{Batch, Command, Reply};
pub use memory::MemoryStore;

/// Ordered-set score.
pub type Score = i64;

/// The store primitive protocol.
///
/// Missing keys behave as empty collections for reads; re-adding an
/// existing set member is a no-op. Operations against a key holding an
/// entry of a different primitive type fail with a wrong-type error.
pub trait Store: Send + Sync {
    // --- set operations ---

    /// Add members to a set; returns how many were newly added.
    fn set_add(&self, key: &str, members: &[&str]) -> WeftResult<u64>;

    /// Remove members from a set; returns how many were present.
    fn set_remove(&self, key: &str, members: &[&str]) -> WeftResult<u64>;

    /// Test set membership.
    fn set_contains(&self, key: &str, member: &str) -> WeftResult<bool>;

    /// All members of a set.
    fn set_members(&self, key: &str) -> WeftResult<HashSet<String>>;

    /// Union of several sets.
    fn set_union(&self, keys: &[String]) -> WeftResult<HashSet<String>>;

    /// Cardinality of a set.
    fn set_card(&self, key: &str) -> WeftResult<u64>;

    // --- ordered-set operations ---

    /// Add scored members; a later entry for the same member wins.
    fn zset_add(&self, key: &str, entries: &[(&str, Score)]) -> WeftResult<u64>;

    /// Remove members from an ordered set.
    fn zset_remove(&self, key: &str, members: &[&str]) -> WeftResult<u64>;

    /// Members by rank range, both bounds inclusive. Negative indices
    /// count from the end; members order by (score, member).
    fn zset_range(&self, key: &str, start: i64, stop: i64) -> WeftResult<Vec<String>>;

    /// Number of members with a score in the inclusive range.
    fn zset_count(&self, key: &str, min: Score, max: Score) -> WeftResult<u64>;

    // --- string and counter operations ---

    /// Read a string value.
    fn get(&self, key: &str) -> WeftResult<Option<String>>;

    /// Write a string value unless the key exists; returns whether it
    /// wrote.
    fn set_if_absent(&self, key: &str, value: &str) -> WeftResult<bool>;

    /// Atomically increment an integer value, creating it at zero first.
    fn incr(&self, key: &str) -> WeftResult<i64>;

    // --- keys ---

    /// Delete whole keys of any type; returns how many existed.
    fn remove(&self, keys: &[String]) -> WeftResult<u64>;

    // --- batched commands ---

    /// Execute a command group with all-or-nothing visibility. Replies are
    /// positional.
    fn apply(&self, batch: Batch) -> WeftResult<Vec<Reply>>;

    // --- connection lifecycle ---

    /// Commit the current transaction, if the store holds one open.
    fn commit(&self) -> WeftResult<()> {
        Ok(())
    }

    /// Roll back to the last commit, if the store holds a transaction
    /// open.
    fn rollback(&self) -> WeftResult<()> {
        Ok(())
    }

    /// Release the underlying connection.
    fn close(&self) -> WeftResult<()> {
        Ok(())
    }
}
