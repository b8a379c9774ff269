mod file_mode;
mod permission_status;

pub use file_mode::{FileMode, FileModeError};
pub use permission_status::PermissionStatus;
