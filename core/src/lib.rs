pub mod config;
pub mod model;
pub mod storage;
pub mod util;

pub use model::repository::{Store, StoreError, Transaction};
