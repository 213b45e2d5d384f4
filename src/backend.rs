//! Where the account store keeps its state: a flat map of keys to JSON text,
//! the same shape as a browser's `localStorage`.
//!
//! Nothing coordinates writers. Two processes (or tabs) sharing one store
//! each read, modify and replace whole values, so the last write wins.

use std::io;

#[derive(Debug)]
pub(crate) enum FindError {
    NotFound,
    Internal,
}

mod backend_file;
pub use backend_file::FileStorage;

mod backend_memory;
pub use backend_memory::MemoryStorage;

pub trait Storage {
    /// The value under `key`, or `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;

    /// Removing a key that isn't there is not an error.
    fn delete(&mut self, key: &str) -> io::Result<()>;
}
