pub mod batch;
pub mod category;
pub mod db;
mod error;
pub mod query;
pub mod resource;
pub mod stats;
#[cfg(test)]
mod test;
pub mod transfer;
mod validation;

pub use db::{Store, Transaction};
pub use error::StoreError;
