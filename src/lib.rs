pub mod config;
pub mod error;
pub mod options;
pub mod security;
pub mod stores;
pub mod utils;
pub mod version;

pub mod prelude {
    pub use crate::config::{Configuration, ConfigurationError, UmaskSource, FILE_CREATION_UMASK_KEY};
    pub use crate::error::*;
    pub use crate::options::*;
    pub use crate::security::{FileMode, PermissionStatus};
    pub use crate::stores::{EntryKind, MemoryUnderStore, StoreError, UnderStore, UnderStoreStatus};
}
