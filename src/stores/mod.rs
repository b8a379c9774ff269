mod traits;

pub use traits::{EntryKind, StoreError, UnderStore, UnderStoreStatus};

use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::trace;

use crate::options::{CreateOptions, DeleteOptions, ListOptions, MkdirsOptions, OpenOptions};
use crate::security::PermissionStatus;
use crate::utils::current_time_ms;

#[derive(Debug, Clone)]
enum EntryData {
    File(Vec<u8>),
    Directory,
}

#[derive(Debug, Clone)]
struct Entry {
    data: EntryData,
    permission_status: PermissionStatus,
    modified_at_ms: i64,
}

impl Entry {
    fn size(&self) -> u64 {
        match &self.data {
            EntryData::File(contents) => contents.len() as u64,
            EntryData::Directory => 0,
        }
    }

    fn kind(&self) -> EntryKind {
        match &self.data {
            EntryData::File(_) => EntryKind::File,
            EntryData::Directory => EntryKind::Directory,
        }
    }

    fn status(&self, path: &str) -> UnderStoreStatus {
        UnderStoreStatus::new(
            path,
            self.kind(),
            self.size(),
            self.permission_status.clone(),
            self.modified_at_ms,
        )
    }
}

/// In-memory reference implementation of [`UnderStore`]. Useful for tests and for pinning down
/// the option semantics a real backend needs to reproduce. The root directory `/` always exists
/// and can't be created or deleted.
#[derive(Debug, Default)]
pub struct MemoryUnderStore {
    entries: BTreeMap<String, Entry>,
}

impl MemoryUnderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn ensure_parent_directory(&self, path: &str) -> Result<(), StoreError> {
        let parent = parent_of(path);

        if parent == "/" {
            return Ok(());
        }

        match self.entries.get(parent) {
            Some(entry) => match entry.data {
                EntryData::Directory => Ok(()),
                EntryData::File(_) => Err(StoreError::NotADirectory(parent.to_string())),
            },
            None => Err(StoreError::NotFound(parent.to_string())),
        }
    }

    fn child_paths(&self, dir: &str) -> Vec<String> {
        let prefix = if dir == "/" {
            "/".to_string()
        } else {
            format!("{dir}/")
        };

        self.entries
            .keys()
            .filter(|path| path.starts_with(&prefix))
            .cloned()
            .collect()
    }
}

#[async_trait(?Send)]
impl UnderStore for MemoryUnderStore {
    async fn create(
        &mut self,
        path: &str,
        options: &CreateOptions,
        contents: &[u8],
    ) -> Result<(), StoreError> {
        let path = normalize_path(path)?;

        if path == "/" {
            return Err(StoreError::InvalidPath(path));
        }

        if self.entries.contains_key(&path) {
            return Err(StoreError::AlreadyExists(path));
        }

        self.ensure_parent_directory(&path)?;

        trace!(path = %path, options = %options, "creating file");

        self.entries.insert(
            path,
            Entry {
                data: EntryData::File(contents.to_vec()),
                permission_status: options.permission_status().clone(),
                modified_at_ms: current_time_ms(),
            },
        );

        Ok(())
    }

    async fn mkdirs(&mut self, path: &str, options: &MkdirsOptions) -> Result<(), StoreError> {
        let path = normalize_path(path)?;

        if path == "/" {
            return Ok(());
        }

        if let Some(existing) = self.entries.get(&path) {
            return match existing.data {
                EntryData::Directory => Ok(()),
                EntryData::File(_) => Err(StoreError::AlreadyExists(path)),
            };
        }

        if !options.create_parent() {
            self.ensure_parent_directory(&path)?;
        }

        trace!(path = %path, options = %options, "creating directory");

        // Walk down from the root creating whatever is missing. When create_parent is off the
        // parent check above means only the final segment gets created here.
        for ancestor in ancestors_of(&path) {
            match self.entries.get(&ancestor) {
                Some(entry) if matches!(entry.data, EntryData::Directory) => continue,
                Some(_) => return Err(StoreError::NotADirectory(ancestor)),
                None => {
                    self.entries.insert(
                        ancestor,
                        Entry {
                            data: EntryData::Directory,
                            permission_status: options.permission_status().clone(),
                            modified_at_ms: current_time_ms(),
                        },
                    );
                }
            }
        }

        Ok(())
    }

    async fn delete(&mut self, path: &str, options: &DeleteOptions) -> Result<(), StoreError> {
        let path = normalize_path(path)?;

        if path == "/" {
            return Err(StoreError::InvalidPath(path));
        }

        let entry = self
            .entries
            .get(&path)
            .ok_or_else(|| StoreError::NotFound(path.clone()))?;

        if matches!(entry.data, EntryData::Directory) {
            let children = self.child_paths(&path);

            if !children.is_empty() && !options.recursive() {
                return Err(StoreError::DirectoryNotEmpty(path));
            }

            for child in children {
                self.entries.remove(&child);
            }
        }

        trace!(path = %path, "deleting entry");
        self.entries.remove(&path);

        Ok(())
    }

    async fn open(&self, path: &str, options: &OpenOptions) -> Result<Vec<u8>, StoreError> {
        let path = normalize_path(path)?;

        let entry = self
            .entries
            .get(&path)
            .ok_or_else(|| StoreError::NotFound(path.clone()))?;

        match &entry.data {
            EntryData::File(contents) => {
                let offset = options.offset().min(contents.len() as u64) as usize;
                Ok(contents[offset..].to_vec())
            }
            EntryData::Directory => Err(StoreError::NotAFile(path)),
        }
    }

    async fn list(
        &self,
        path: &str,
        options: &ListOptions,
    ) -> Result<Vec<UnderStoreStatus>, StoreError> {
        let path = normalize_path(path)?;

        if path != "/" {
            match self.entries.get(&path) {
                Some(entry) if matches!(entry.data, EntryData::Directory) => (),
                Some(_) => return Err(StoreError::NotADirectory(path)),
                None => return Err(StoreError::NotFound(path)),
            }
        }

        let statuses = self
            .child_paths(&path)
            .into_iter()
            .filter(|child| options.recursive() || parent_of(child) == path)
            .map(|child| {
                let entry = &self.entries[&child];
                entry.status(&child)
            })
            .collect();

        Ok(statuses)
    }

    async fn status(&self, path: &str) -> Result<UnderStoreStatus, StoreError> {
        let path = normalize_path(path)?;

        if path == "/" {
            return Ok(UnderStoreStatus::new(
                path,
                EntryKind::Directory,
                0,
                PermissionStatus::defaults(),
                0,
            ));
        }

        self.entries
            .get(&path)
            .map(|entry| entry.status(&path))
            .ok_or(StoreError::NotFound(path))
    }
}

/// Collapses duplicate separators and strips any trailing one, so equivalent spellings of a path
/// land on the same key. Paths must be absolute and free of `.`/`..` segments.
fn normalize_path(path: &str) -> Result<String, StoreError> {
    if !path.starts_with('/') {
        return Err(StoreError::InvalidPath(path.to_string()));
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.iter().any(|s| *s == "." || *s == "..") {
        return Err(StoreError::InvalidPath(path.to_string()));
    }

    Ok(format!("/{}", segments.join("/")))
}

fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

fn ancestors_of(path: &str) -> Vec<String> {
    let mut ancestors = Vec::new();
    let mut end = 0;

    while let Some(next) = path[end + 1..].find('/') {
        end += next + 1;
        ancestors.push(path[..end].to_string());
    }

    ancestors.push(path.to_string());
    ancestors
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::security::FileMode;

    #[test]
    fn test_path_helpers() {
        assert_eq!(normalize_path("/a/b/").unwrap(), "/a/b");
        assert_eq!(normalize_path("//a//b").unwrap(), "/a/b");
        assert_eq!(normalize_path("/").unwrap(), "/");
        assert!(normalize_path("relative/path").is_err());
        assert!(normalize_path("/a/../b").is_err());

        assert_eq!(parent_of("/a/b/c"), "/a/b");
        assert_eq!(parent_of("/a"), "/");

        assert_eq!(ancestors_of("/a/b/c"), vec!["/a", "/a/b", "/a/b/c"]);
        assert_eq!(ancestors_of("/a"), vec!["/a"]);
    }

    #[tokio::test]
    async fn test_create_records_permission_status() {
        let mut store = MemoryUnderStore::new();

        let status = PermissionStatus::defaults().with_mode(FileMode::new(0o750));
        let options = CreateOptions::default().with_permission_status(status.clone());

        store.create("/data.bin", &options, b"payload").await.unwrap();

        let recorded = store.status("/data.bin").await.unwrap();
        assert!(recorded.is_file());
        assert_eq!(recorded.size(), 7);
        assert_eq!(recorded.permission_status(), &status);
        assert!(recorded.modified_at_ms() > 0);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates_and_missing_parents() {
        let mut store = MemoryUnderStore::new();
        let options = CreateOptions::default();

        store.create("/file", &options, b"one").await.unwrap();

        let duplicate = store.create("/file", &options, b"two").await;
        assert!(matches!(duplicate, Err(StoreError::AlreadyExists(_))));

        let orphan = store.create("/missing/file", &options, b"three").await;
        assert!(matches!(orphan, Err(StoreError::NotFound(_))));

        let through_file = store.create("/file/nested", &options, b"four").await;
        assert!(matches!(through_file, Err(StoreError::NotADirectory(_))));
    }

    #[tokio::test]
    async fn test_mkdirs_creates_parents_when_allowed() {
        let mut store = MemoryUnderStore::new();

        store
            .mkdirs("/a/b/c", &MkdirsOptions::default())
            .await
            .unwrap();

        assert!(store.status("/a").await.unwrap().is_directory());
        assert!(store.status("/a/b").await.unwrap().is_directory());
        assert!(store.status("/a/b/c").await.unwrap().is_directory());

        // Creating an existing directory is a no-op
        store
            .mkdirs("/a/b", &MkdirsOptions::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_mkdirs_without_parent_flag_requires_parent() {
        let mut store = MemoryUnderStore::new();
        let options = MkdirsOptions::default().with_create_parent(false);

        let orphan = store.mkdirs("/a/b", &options).await;
        assert!(matches!(orphan, Err(StoreError::NotFound(_))));

        store.mkdirs("/a", &options).await.unwrap();
        store.mkdirs("/a/b", &options).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_honors_recursive_flag() {
        let mut store = MemoryUnderStore::new();

        store.mkdirs("/dir", &MkdirsOptions::default()).await.unwrap();
        store
            .create("/dir/file", &CreateOptions::default(), b"data")
            .await
            .unwrap();

        let refused = store.delete("/dir", &DeleteOptions::default()).await;
        assert!(matches!(refused, Err(StoreError::DirectoryNotEmpty(_))));

        store
            .delete("/dir", &DeleteOptions::default().with_recursive(true))
            .await
            .unwrap();

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_open_honors_offset() {
        let mut store = MemoryUnderStore::new();

        store
            .create("/greeting", &CreateOptions::default(), b"hello world")
            .await
            .unwrap();

        let all = store.open("/greeting", &OpenOptions::default()).await.unwrap();
        assert_eq!(all, b"hello world");

        let tail = store
            .open("/greeting", &OpenOptions::default().with_offset(6))
            .await
            .unwrap();
        assert_eq!(tail, b"world");

        let past_end = store
            .open("/greeting", &OpenOptions::default().with_offset(64))
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_list_direct_and_recursive() {
        let mut store = MemoryUnderStore::new();

        store.mkdirs("/top/sub", &MkdirsOptions::default()).await.unwrap();
        store
            .create("/top/file", &CreateOptions::default(), b"1")
            .await
            .unwrap();
        store
            .create("/top/sub/deep", &CreateOptions::default(), b"2")
            .await
            .unwrap();

        let direct = store.list("/top", &ListOptions::default()).await.unwrap();
        let direct_paths: Vec<&str> = direct.iter().map(|s| s.path()).collect();
        assert_eq!(direct_paths, vec!["/top/file", "/top/sub"]);

        let all = store
            .list("/top", &ListOptions::default().with_recursive(true))
            .await
            .unwrap();
        let all_paths: Vec<&str> = all.iter().map(|s| s.path()).collect();
        assert_eq!(all_paths, vec!["/top/file", "/top/sub", "/top/sub/deep"]);

        let not_a_dir = store.list("/top/file", &ListOptions::default()).await;
        assert!(matches!(not_a_dir, Err(StoreError::NotADirectory(_))));
    }
}
