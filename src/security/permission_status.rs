use std::fmt::{self, Display, Formatter};

use crate::security::FileMode;

/// The ownership and mode assigned to an entry in an under-storage backend. Owner and group start
/// out undetermined and are filled in by whichever backend ultimately materializes the entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionStatus {
    owner: Option<String>,
    group: Option<String>,
    mode: FileMode,
}

impl PermissionStatus {
    /// Baseline status for new entries: owner and group undetermined, mode wide open at 0777
    /// until a umask narrows it.
    pub fn defaults() -> Self {
        Self {
            owner: None,
            group: None,
            mode: FileMode::DEFAULT,
        }
    }

    pub fn new(owner: Option<String>, group: Option<String>, mode: FileMode) -> Self {
        Self { owner, group, mode }
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Narrows the mode by the file creation umask. Owner and group are intentionally left alone:
    /// the create path of backends only accepts a mode today, not an owner or group.
    pub fn apply_file_creation_mask(mut self, umask: FileMode) -> Self {
        self.mode = self.mode.apply_umask(umask);
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_mode(mut self, mode: FileMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for PermissionStatus {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Display for PermissionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "owner={} group={} mode={}",
            self.owner.as_deref().unwrap_or("<unset>"),
            self.group.as_deref().unwrap_or("<unset>"),
            self.mode,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_baseline() {
        let status = PermissionStatus::defaults();

        assert_eq!(status.owner(), None);
        assert_eq!(status.group(), None);
        assert_eq!(status.mode(), FileMode::new(0o777));
    }

    #[test]
    fn test_file_creation_mask_only_touches_mode() {
        let status = PermissionStatus::defaults()
            .with_owner("metadata-svc")
            .with_group("storage")
            .apply_file_creation_mask(FileMode::new(0o022));

        assert_eq!(status.owner(), Some("metadata-svc"));
        assert_eq!(status.group(), Some("storage"));
        assert_eq!(status.mode(), FileMode::new(0o755));
    }

    #[test]
    fn test_with_transforms_replace_fields() {
        let status = PermissionStatus::defaults()
            .with_mode(FileMode::new(0o640))
            .with_owner("alice");

        assert_eq!(status.mode(), FileMode::new(0o640));
        assert_eq!(status.owner(), Some("alice"));
        assert_eq!(status.group(), None);
    }

    #[test]
    fn test_display_form() {
        let unset = PermissionStatus::defaults();
        assert_eq!(unset.to_string(), "owner=<unset> group=<unset> mode=0777");

        let assigned = PermissionStatus::defaults()
            .with_owner("alice")
            .with_group("users")
            .with_mode(FileMode::new(0o750));
        assert_eq!(assigned.to_string(), "owner=alice group=users mode=0750");
    }
}
