// Adapters layer: concrete storage backends and seed sources.

pub mod seed;
pub mod storage;

pub use seed::{seed_source_for, FileSeedSource, HttpSeedSource};
pub use storage::{LocalStorage, MemoryStorage};
