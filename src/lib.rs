#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// The chained hash table itself.
pub mod chain_table;

/// Pluggable hashing and equality strategies.
///
/// This module provides the `KeyStrategy` trait that binds a hash function
/// and an equality comparison to a table at construction, plus the reference
/// `Modular` strategy for unsigned integer keys.
pub mod strategy;

pub use chain_table::ChainTable;
pub use chain_table::DEFAULT_BUCKET_COUNT;
pub use chain_table::Entry;
#[cfg(feature = "foldhash")]
pub use strategy::Folded;
pub use strategy::KeyStrategy;
pub use strategy::Modular;
