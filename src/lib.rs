pub mod auth;
pub mod backend;
pub mod maker;
pub mod outcome;
pub mod session;
pub mod store;
pub mod time;
pub mod user;

pub use backend::{FileStorage, MemoryStorage, Storage};
pub use store::{AccountStore, Error, ErrorKind, Result};
