mod batch;
mod category;
pub mod id_types;
mod resource;
mod response;
mod stats;
mod transfer;
pub use batch::*;
pub use category::*;
pub use id_types::*;
pub use resource::*;
pub use response::*;
pub use stats::*;
pub use transfer::*;
