mod error;
mod paths;
mod store;

pub use error::StoreError;
pub use paths::{file_name, parent_of, split_path};
pub use store::Store;
