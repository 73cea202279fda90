pub mod repository;

mod batch;
mod category;
mod id_types;
mod query;
mod resource;
mod settings;
mod stats;
mod transfer;
pub use batch::*;
pub use category::*;
pub use id_types::*;
pub use query::*;
pub use resource::*;
pub use settings::*;
pub use stats::*;
pub use transfer::*;
