//! # lutcam-filters
//!
//! Filter registry and LUT cache.
//!
//! The registry owns the set of selectable filters - the built-in
//! catalog plus anything the user has dropped into managed storage -
//! and the parsed numeric payload for each of them. Selection state
//! elsewhere in the app holds a [`FilterId`]; the registry answers
//! `id -> payload` lookups in O(1) from an in-memory cache.
//!
//! # Concurrency
//!
//! Built-in LUTs parse in parallel at startup (rayon); the resulting
//! list is published under a single brief write lock in fixed catalog
//! order, so load concurrency never leaks into user-visible ordering.
//! After loading, reads go through a shared `RwLock` read guard against
//! an effectively immutable snapshot; mutation (add/remove) is
//! exclusive and brief.
//!
//! There is deliberately no global singleton here: callers construct a
//! [`FilterRegistry`] once and share it via `Arc` with the pipeline and
//! the UI layer.

#![warn(missing_docs)]

pub mod descriptor;
pub mod error;
pub mod registry;

pub use descriptor::{FilterDescriptor, FilterId, FilterKind};
pub use error::{FilterError, FiltersResult, StorageError};
pub use registry::{FilterRegistry, RegistryConfig};
