use std::fmt::{self, Display, Formatter};

use crate::config::{ConfigurationError, UmaskSource};
use crate::security::PermissionStatus;

/// Options for creating a file in an under-storage backend.
///
/// A freshly constructed value carries [`PermissionStatus::defaults`]; the configuration-aware
/// constructor additionally narrows the mode by the configured file creation umask. Callers that
/// need something else entirely chain [`CreateOptions::with_permission_status`] over either
/// starting point and hand the finished value to the backend's create call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CreateOptions {
    permission_status: PermissionStatus,
}

impl CreateOptions {
    /// Builds options whose mode has been narrowed by the umask found in `config`, if any. Owner
    /// and group stay undetermined since backends only honor a mode at creation time.
    ///
    /// A configured but malformed umask fails construction outright. Quietly proceeding with the
    /// unmasked default would create files more permissive than the operator asked for.
    pub fn from_configuration(config: &impl UmaskSource) -> Result<Self, ConfigurationError> {
        let permission_status = match config.file_creation_umask()? {
            Some(umask) => PermissionStatus::defaults().apply_file_creation_mask(umask),
            None => PermissionStatus::defaults(),
        };

        Ok(Self { permission_status })
    }

    pub fn permission_status(&self) -> &PermissionStatus {
        &self.permission_status
    }

    /// Replaces the held permission status wholesale, consuming and returning the options value
    /// so construction chains stay ergonomic.
    pub fn with_permission_status(mut self, permission_status: PermissionStatus) -> Self {
        self.permission_status = permission_status;
        self
    }
}

impl Display for CreateOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CreateOptions({})", self.permission_status)
    }
}
