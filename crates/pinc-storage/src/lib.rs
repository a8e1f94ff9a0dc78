//! Filesystem abstraction for pinc.
//!
//! This crate provides a [`Storage`] trait for the handful of filesystem primitives
//! the include resolver needs. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between resolution logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `exists()`, `is_dir()`, `list_dir()`, and `read()` methods
//! - [`FsStorage`] implementation backed by `std::fs`
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pinc_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new();
//! if storage.is_dir(Path::new("styles")) {
//!     for name in storage.list_dir(Path::new("styles"))? {
//!         println!("{name}");
//!     }
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
