use async_trait::async_trait;

use crate::options::{CreateOptions, DeleteOptions, ListOptions, MkdirsOptions, OpenOptions};
use crate::security::PermissionStatus;

/// The boundary between assembled option values and a concrete storage backend. Implementations
/// are expected to honor every knob on the options they're handed: the permission status recorded
/// on created entries, parent handling for directory creation, the recursive flags, and read
/// offsets. Implementations own durability and availability; nothing in this crate performs I/O
/// on their behalf.
#[async_trait(?Send)]
pub trait UnderStore {
    /// Creates a file at the provided path with the given contents, recording the options'
    /// permission status on the new entry. Fails if the path already exists or its parent
    /// directory is missing; parents are the business of [`UnderStore::mkdirs`].
    async fn create(
        &mut self,
        path: &str,
        options: &CreateOptions,
        contents: &[u8],
    ) -> Result<(), StoreError>;

    /// Creates a directory at the provided path. Missing intermediate directories are created
    /// when the options allow it, each carrying the options' permission status. Succeeds without
    /// effect when the directory already exists.
    async fn mkdirs(&mut self, path: &str, options: &MkdirsOptions) -> Result<(), StoreError>;

    /// Removes the entry at the provided path. Directories with children are only removed when
    /// the options request recursion.
    async fn delete(&mut self, path: &str, options: &DeleteOptions) -> Result<(), StoreError>;

    /// Reads the contents of the file at the provided path, starting at the options' offset. An
    /// offset at or past the end of the file yields an empty buffer.
    async fn open(&self, path: &str, options: &OpenOptions) -> Result<Vec<u8>, StoreError>;

    /// Lists the entries under the provided directory path, direct children only unless the
    /// options request recursion.
    async fn list(
        &self,
        path: &str,
        options: &ListOptions,
    ) -> Result<Vec<UnderStoreStatus>, StoreError>;

    /// Reports the status of the entry at the provided path.
    async fn status(&self, path: &str) -> Result<UnderStoreStatus, StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// What a backend knows about a stored entry, including the permission status recorded when the
/// entry was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnderStoreStatus {
    path: String,
    kind: EntryKind,
    size: u64,
    permission_status: PermissionStatus,
    modified_at_ms: i64,
}

impl UnderStoreStatus {
    pub fn new(
        path: impl Into<String>,
        kind: EntryKind,
        size: u64,
        permission_status: PermissionStatus,
        modified_at_ms: i64,
    ) -> Self {
        Self {
            path: path.into(),
            kind,
            size,
            permission_status,
            modified_at_ms,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn permission_status(&self) -> &PermissionStatus {
        &self.permission_status
    }

    pub fn modified_at_ms(&self) -> i64 {
        self.modified_at_ms
    }
}

/// Common errors backends can surface from the storage seam.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An error that couldn't be represented by one of the standard variants, specific to the
    /// underlying implementation.
    #[error("implementation specific error: {0}")]
    Implementation(String),

    #[error("path already exists: {0}")]
    AlreadyExists(String),

    #[error("path not found: {0}")]
    NotFound(String),

    #[error("path is not a directory: {0}")]
    NotADirectory(String),

    #[error("path is not a file: {0}")]
    NotAFile(String),

    #[error("directory is not empty: {0}")]
    DirectoryNotEmpty(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),
}
