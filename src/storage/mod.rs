//! Entity store for listings, accounts, appointments and transactions.
//!
//! # Modules
//!
//! - `backend`: the [`Storage`] repository trait
//! - `catalog`: the record collections and their mutation rules
//! - `memory`: copy-on-write in-memory backend
//! - `json`: JSON file backend with atomic writes
//! - `shared`: lock-guarded handle for multi-threaded hosts
//! - `seed`: the sample catalog

pub mod backend;
pub mod catalog;
pub mod json;
pub mod memory;
pub mod seed;
pub mod shared;

pub use backend::Storage;
pub use catalog::Catalog;
pub use json::JsonStorage;
pub use memory::MemoryStorage;
pub use shared::SharedStore;
