//! Storage Adapters
//!
//! Implementations of the SleepStore port.
//!
//! ## Available Adapters
//!
//! - **FileSleepStore** - Stores each key as a JSON file on disk
//! - **InMemorySleepStore** - Stores state in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSleepStore, InMemorySleepStore};
//!
//! // Persistent: file-based storage
//! let storage = FileSleepStore::new("./data");
//!
//! // Testing: in-memory storage
//! let storage = InMemorySleepStore::new();
//! ```

mod file_sleep_store;
mod in_memory_sleep_store;

pub use file_sleep_store::{FileSleepStore, STORAGE_PREFIX, STORAGE_VERSION};
pub use in_memory_sleep_store::InMemorySleepStore;
