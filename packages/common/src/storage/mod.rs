mod error;
mod name;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use name::{backup_name, stored_name_for};
pub use traits::FileStore;
