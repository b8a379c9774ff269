use std::fmt::{self, Display, Formatter};

use crate::config::{ConfigurationError, UmaskSource};
use crate::security::PermissionStatus;

/// Options for creating a directory in an under-storage backend. Missing intermediate
/// directories are created along the way unless `create_parent` is switched off.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MkdirsOptions {
    permission_status: PermissionStatus,
    create_parent: bool,
}

impl MkdirsOptions {
    /// Same umask treatment as [`crate::options::CreateOptions::from_configuration`]: only the
    /// mode is narrowed, owner and group stay undetermined.
    pub fn from_configuration(config: &impl UmaskSource) -> Result<Self, ConfigurationError> {
        let permission_status = match config.file_creation_umask()? {
            Some(umask) => PermissionStatus::defaults().apply_file_creation_mask(umask),
            None => PermissionStatus::defaults(),
        };

        Ok(Self {
            permission_status,
            create_parent: true,
        })
    }

    pub fn permission_status(&self) -> &PermissionStatus {
        &self.permission_status
    }

    pub fn create_parent(&self) -> bool {
        self.create_parent
    }

    pub fn with_permission_status(mut self, permission_status: PermissionStatus) -> Self {
        self.permission_status = permission_status;
        self
    }

    pub fn with_create_parent(mut self, create_parent: bool) -> Self {
        self.create_parent = create_parent;
        self
    }
}

impl Default for MkdirsOptions {
    fn default() -> Self {
        Self {
            permission_status: PermissionStatus::defaults(),
            create_parent: true,
        }
    }
}

impl Display for MkdirsOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MkdirsOptions({}, create_parent={})",
            self.permission_status, self.create_parent
        )
    }
}
