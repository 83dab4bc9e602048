pub mod controller;
pub mod forms;
pub mod id;
pub mod render;
pub mod seed;
pub mod state;
pub mod store;

pub use crate::domain::model::{Brand, Model};
pub use crate::domain::ports::{IdGenerator, SeedSource, Storage};
pub use crate::utils::error::Result;
