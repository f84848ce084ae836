mod error;
mod models;
mod repositories;
mod store;

pub use error::StoreError;
pub use models::*;
pub use repositories::*;
pub use store::{Collections, Store};
