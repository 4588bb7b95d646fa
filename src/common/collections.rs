//! Collection aliases used throughout the crate.
//!
//! Hash maps use the FxHash hasher; construct them with `HashMap::default()`.
//! Ordered maps are re-exported so callers get deterministic iteration without
//! reaching into `std::collections` directly.

pub use std::collections::{BTreeMap, BTreeSet};

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type HashSet<T> = rustc_hash::FxHashSet<T>;
