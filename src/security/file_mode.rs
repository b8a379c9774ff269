use std::fmt::{self, Display, Formatter};
use std::ops::{BitAnd, BitOr, Not};

const PERMISSION_MASK: u32 = 0o777;

/// The permission bits assigned to a stored entry. Only the classic user/group/other rwx bits are
/// represented; under-storage backends that support richer ACLs layer them on separately.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileMode(u32);

impl FileMode {
    /// Baseline mode for newly created entries before any umask narrowing is applied.
    pub const DEFAULT: Self = Self(0o777);

    /// The conventional file creation umask, producing 0755 when applied to the default mode.
    pub const DEFAULT_UMASK: Self = Self(0o022);

    pub const fn new(bits: u32) -> Self {
        Self(bits & PERMISSION_MASK)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Clears the bits the umask restricts, leaving the rest of the mode untouched.
    pub const fn apply_umask(self, umask: FileMode) -> Self {
        Self(self.0 & !umask.0 & PERMISSION_MASK)
    }

    /// Parses the octal string form used by configuration values such as "0022" or "777".
    pub fn from_octal_str(value: &str) -> Result<Self, FileModeError> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(FileModeError::NotOctal(value.to_string()));
        }

        let bits = u32::from_str_radix(trimmed, 8)
            .map_err(|_| FileModeError::NotOctal(value.to_string()))?;

        if bits > PERMISSION_MASK {
            return Err(FileModeError::OutOfRange(bits));
        }

        Ok(Self(bits))
    }
}

impl BitAnd for FileMode {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for FileMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl Not for FileMode {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0 & PERMISSION_MASK)
    }
}

impl Display for FileMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

impl fmt::Debug for FileMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FileMode({:04o})", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FileModeError {
    #[error("mode value {0:?} is not an octal number")]
    NotOctal(String),

    #[error("mode value {0:o} has bits outside the permission range")]
    OutOfRange(u32),
}
